//! EEPROM address layout
//!
//! Byte offsets of every persisted field. These are a frozen wire-format
//! contract: data written by earlier firmware revisions must keep reading
//! correctly, so offsets and widths never move.

/// Z-probe offset, 4 bytes, f32 little-endian
pub const ADDR_ZPROBE_OFFSET: u16 = 232;

/// Emergency-stop latch
pub const ADDR_EMERGENCY_STOP: u16 = 499;

/// First-power-on flag
pub const ADDR_FIRST_POWER_ON: u16 = 500;

/// Autolevel enabled
pub const ADDR_AUTOLEVEL: u16 = 501;

/// Light mode
pub const ADDR_LIGHT: u16 = 502;

/// Serial-screen enabled
pub const ADDR_SERIAL_SCREEN: u16 = 503;

/// Language code (display builds)
pub const ADDR_LANGUAGE: u16 = 504;

/// Box-fan enabled
pub const ADDR_BOX_FAN: u16 = 505;

/// Start of the protected zone; bulk erase stops here
///
/// Everything at or above this address (boundary marker, version, state
/// flag, board tag) survives `erase_all`.
pub const ADDR_PROTECTED_ZONE: u16 = 4071;

/// Settings format version
pub const ADDR_VERSION: u16 = 4072;

/// Enable/disable state flag
pub const ADDR_STATE_FLAG: u16 = 4073;

/// Board-family tag, [`BOARD_TAG_LEN`] bytes
pub const ADDR_BOARD_FAMILY: u16 = 4081;

/// Width of the board-family tag field: 3 ASCII characters plus one
/// spare byte that takes no part in matching
pub const BOARD_TAG_LEN: usize = 4;

/// Fill byte written by bulk erase; matches the erased state of the part
pub const ERASE_FILL: u8 = 0xFF;

/// Current settings format version, stamped at the end of a bulk erase
pub const LAYOUT_VERSION: u8 = 0x01;

/// EEPROM size of the supported controller boards (4 KiB parts)
pub const MEMORY_SIZE: usize = 4096;
