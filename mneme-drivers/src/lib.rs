//! Memory device implementations
//!
//! This crate provides concrete implementations of the `ByteMemory`
//! trait defined in mneme-core:
//!
//! - AT24-family I2C serial EEPROMs (the parts fitted on supported boards)
//! - An in-memory device for host-side tests and bring-up

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
