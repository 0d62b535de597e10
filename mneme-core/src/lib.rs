//! Board-agnostic settings storage for printer controller boards
//!
//! This crate contains the persistent-settings logic that does not depend
//! on a specific memory device:
//!
//! - Hardware abstraction trait for byte-addressed non-volatile memory
//! - The frozen EEPROM address layout
//! - Field types with their encode/decode and fallback rules
//! - The settings store: validity-checked accessors and the guarded
//!   erase-and-reinitialize sequence

#![no_std]
#![deny(unsafe_code)]

pub mod settings;
pub mod traits;
