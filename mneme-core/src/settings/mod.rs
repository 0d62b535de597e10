//! Persistent settings over a fixed EEPROM layout
//!
//! Every setting lives at a frozen byte offset of the board EEPROM and is
//! read through a validity-checked accessor that falls back to a safe
//! default on corrupt or out-of-range data. Changing an offset or width
//! breaks compatibility with data already persisted in the field.
//!
//! # EEPROM layout
//!
//! ```text
//! Offset  Width  Field
//!    232      4  Z-probe offset (f32, little-endian)
//!    499      1  Emergency-stop latch
//!    500      1  First-power-on flag
//!    501      1  Autolevel enabled
//!    502      1  Light mode
//!    503      1  Serial-screen enabled
//!    504      1  Language code (display builds)
//!    505      1  Box-fan enabled
//!   4071      1  Protected-zone boundary marker
//!   4072      1  Settings format version
//!   4073      1  Enable/disable flag
//!   4081      4  Board-family tag (3 ASCII chars + spare byte)
//! ```
//!
//! Bulk erase fills `[0, 4071)` and never touches the protected zone at
//! `[4071, end)` - board identity, format version and the state flag
//! survive every erase.

pub mod layout;
pub mod store;
pub mod types;

pub use store::{SettingsStore, StoreConfig};
#[cfg(feature = "display")]
pub use types::Language;
pub use types::{BoardType, EmergencyStop, LightMode, StoreState};
