//! Field types and their byte encodings
//!
//! Every decoder here is total: each of the 256 byte values maps to some
//! variant, with out-of-range values landing on the field's safe
//! fallback. Corrupt data is therefore never an error, it is a defined
//! value.

use super::layout::BOARD_TAG_LEN;

/// Emergency-stop latched
pub const EMERGENCY_STOP_ACTIVE: u8 = 0x00;
/// Emergency-stop clear; doubles as the erased-memory value
pub const EMERGENCY_STOP_INACTIVE: u8 = 0xFF;
/// Store has been initialized at least once
pub const INITIALIZED: u8 = 0x00;
/// Factory-fresh or erased store
pub const UNINITIALIZED: u8 = 0xFF;
pub const LIGHT_OFF: u8 = 0x00;
pub const LIGHT_ON: u8 = 0x01;
pub const LIGHT_AUTO: u8 = 0x02;
pub const AUTOLEVEL_ON: u8 = 0x01;
pub const SERIAL_SCREEN_ON: u8 = 0x01;
pub const BOX_FAN_DISABLED: u8 = 0x00;
pub const STORE_ENABLED: u8 = 0x00;
pub const STORE_DISABLED: u8 = 0x01;

/// Emergency-stop latch state
///
/// Encoded as a sentinel byte rather than a boolean so that erased
/// (all-0xFF) memory reads as Inactive without a separate validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmergencyStop {
    Active,
    Inactive,
}

impl EmergencyStop {
    /// Byte representation for storage
    pub const fn as_byte(self) -> u8 {
        match self {
            EmergencyStop::Active => EMERGENCY_STOP_ACTIVE,
            EmergencyStop::Inactive => EMERGENCY_STOP_INACTIVE,
        }
    }

    /// Decode a stored byte; anything but the active sentinel is Inactive
    pub const fn from_byte(byte: u8) -> Self {
        if byte == EMERGENCY_STOP_ACTIVE {
            EmergencyStop::Active
        } else {
            EmergencyStop::Inactive
        }
    }

    /// Check if the latch is set
    pub const fn is_active(self) -> bool {
        matches!(self, EmergencyStop::Active)
    }
}

/// Chamber light mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightMode {
    Off,
    On,
    /// Follow print activity
    #[default]
    Auto,
}

impl LightMode {
    /// Byte representation for storage
    pub const fn as_byte(self) -> u8 {
        match self {
            LightMode::Off => LIGHT_OFF,
            LightMode::On => LIGHT_ON,
            LightMode::Auto => LIGHT_AUTO,
        }
    }

    /// Decode a stored byte; unknown values fall back to Auto
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            LIGHT_OFF => LightMode::Off,
            LIGHT_ON => LightMode::On,
            _ => LightMode::Auto,
        }
    }
}

/// Whether persisted settings are currently trustworthy
///
/// Advisory marker bracketing the bulk-erase sequence. A crash mid-erase
/// leaves the flag Disabled, which callers must treat as "reinitialize
/// before trusting any field".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreState {
    Enabled,
    Disabled,
}

impl StoreState {
    /// Byte representation for storage
    pub const fn as_byte(self) -> u8 {
        match self {
            StoreState::Enabled => STORE_ENABLED,
            StoreState::Disabled => STORE_DISABLED,
        }
    }

    /// Decode a stored byte
    ///
    /// Only the exact enabled sentinel reads as Enabled; every other
    /// value, including the erased fill, is Disabled. A freshly erased
    /// but never reinitialized store is indistinguishable from an
    /// explicitly disabled one.
    pub const fn from_byte(byte: u8) -> Self {
        if byte == STORE_ENABLED {
            StoreState::Enabled
        } else {
            StoreState::Disabled
        }
    }

    /// Check if settings may be trusted
    pub const fn is_enabled(self) -> bool {
        matches!(self, StoreState::Enabled)
    }
}

/// Controller board family, decoded from the persisted identity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardType {
    /// ZUM Mega 3D board, tag "ZM3"
    ZumMega3d,
    /// CNC variant board, tag "CNC"
    Cnc,
    /// RAMPS 1.3 EFB, the fallback identity for unrecognized tags
    Ramps13Efb,
}

impl BoardType {
    /// Decode a stored tag field
    ///
    /// Matching is exact, case-sensitive and fixed-length over the first
    /// 3 bytes; the spare 4th byte is ignored. Unknown tags decode to
    /// the RAMPS fallback.
    pub fn from_tag(tag: &[u8; BOARD_TAG_LEN]) -> Self {
        if tag.starts_with(b"ZM3") {
            BoardType::ZumMega3d
        } else if tag.starts_with(b"CNC") {
            BoardType::Cnc
        } else {
            BoardType::Ramps13Efb
        }
    }
}

/// Display language selection
///
/// Stored as the raw index byte; indices at or beyond [`Language::COUNT`]
/// fall back to English.
#[cfg(feature = "display")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Language {
    #[default]
    En = 0,
    Es = 1,
    De = 2,
    Fr = 3,
    It = 4,
    Pt = 5,
}

#[cfg(feature = "display")]
impl Language {
    /// Number of known languages; the validity bound for stored indices
    pub const COUNT: u8 = 6;

    /// Stored index byte
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a stored index; out-of-range values fall back to English
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Language::En,
            1 => Language::Es,
            2 => Language::De,
            3 => Language::Fr,
            4 => Language::It,
            5 => Language::Pt,
            _ => Language::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_decode_is_total() {
        assert_eq!(EmergencyStop::from_byte(0x00), EmergencyStop::Active);
        for byte in 1..=255u8 {
            assert_eq!(EmergencyStop::from_byte(byte), EmergencyStop::Inactive);
        }
    }

    #[test]
    fn test_light_mode_unknown_bytes_are_auto() {
        assert_eq!(LightMode::from_byte(LIGHT_OFF), LightMode::Off);
        assert_eq!(LightMode::from_byte(LIGHT_ON), LightMode::On);
        assert_eq!(LightMode::from_byte(LIGHT_AUTO), LightMode::Auto);
        assert_eq!(LightMode::from_byte(0x7C), LightMode::Auto);
        assert_eq!(LightMode::from_byte(0xFF), LightMode::Auto);
    }

    #[test]
    fn test_store_state_only_exact_sentinel_enables() {
        assert_eq!(StoreState::from_byte(STORE_ENABLED), StoreState::Enabled);
        for byte in 1..=255u8 {
            assert_eq!(StoreState::from_byte(byte), StoreState::Disabled);
        }
    }

    #[test]
    fn test_board_tag_matching() {
        assert_eq!(BoardType::from_tag(b"ZM3\0"), BoardType::ZumMega3d);
        assert_eq!(BoardType::from_tag(b"CNC\0"), BoardType::Cnc);
        // Spare byte does not participate in matching
        assert_eq!(BoardType::from_tag(b"ZM3X"), BoardType::ZumMega3d);
        assert_eq!(BoardType::from_tag(b"zm3\0"), BoardType::Ramps13Efb);
        assert_eq!(BoardType::from_tag(&[0xFF; 4]), BoardType::Ramps13Efb);
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_language_index_roundtrip() {
        for index in 0..Language::COUNT {
            assert_eq!(Language::from_index(index).index(), index);
        }
        assert_eq!(Language::from_index(Language::COUNT), Language::En);
        assert_eq!(Language::from_index(0xFF), Language::En);
    }
}
