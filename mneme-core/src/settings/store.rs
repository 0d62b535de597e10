//! Settings store
//!
//! Validity-checked accessors over the fixed EEPROM layout, plus the
//! guarded erase-and-reinitialize sequence. Setters encode and write the
//! field's bytes at its frozen offset; getters read, decode and apply the
//! field's validity rule, substituting the safe default when the stored
//! data is out of range. No accessor can fail.

use crate::traits::ByteMemory;

use super::layout;
#[cfg(feature = "display")]
use super::types::Language;
use super::types::{
    BoardType, EmergencyStop, LightMode, StoreState, AUTOLEVEL_ON, BOX_FAN_DISABLED, INITIALIZED,
    SERIAL_SCREEN_ON, UNINITIALIZED,
};

/// Lowest Z-probe offset accepted from storage (mm)
pub const ZPROBE_OFFSET_MIN_MM: f32 = 0.0;

/// Highest Z-probe offset accepted from storage (mm)
pub const ZPROBE_OFFSET_MAX_MM: f32 = 10.0;

/// Extruder-to-probe offset used when the stored value fails validation (mm)
pub const DEFAULT_ZPROBE_OFFSET_MM: f32 = 1.9;

/// Externally supplied store constants
///
/// Build-time configuration of the supported boards: the format version
/// stamped after a bulk erase and the machine-specific probe offset
/// substituted for out-of-range stored values.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreConfig {
    /// Version stamped after a bulk erase; `None` leaves the version
    /// byte untouched
    pub version: Option<u8>,
    /// Fallback Z-probe offset (mm)
    pub zprobe_fallback_mm: f32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: Some(layout::LAYOUT_VERSION),
            zprobe_fallback_mm: DEFAULT_ZPROBE_OFFSET_MM,
        }
    }
}

/// Address-mapped settings store over a byte-addressed memory device
///
/// One store handle owns the device; the application root creates it and
/// injects it into whatever needs settings. Accessors take `&mut self`,
/// so a shared store requires external serialization - the erase sequence
/// in particular must never interleave with other field access.
pub struct SettingsStore<M: ByteMemory> {
    memory: M,
    config: StoreConfig,
}

impl<M: ByteMemory> SettingsStore<M> {
    /// Create a store with the default configuration
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, StoreConfig::default())
    }

    /// Create a store with explicit configuration
    pub fn with_config(memory: M, config: StoreConfig) -> Self {
        Self { memory, config }
    }

    /// Get the raw memory device for low-level access
    pub fn memory(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consume the store and return the underlying device
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Latch the emergency stop
    pub fn set_emergency(&mut self) {
        self.memory
            .write_byte(layout::ADDR_EMERGENCY_STOP, EmergencyStop::Active.as_byte());
    }

    /// Clear the emergency-stop latch
    pub fn clear_emergency(&mut self) {
        self.memory.write_byte(
            layout::ADDR_EMERGENCY_STOP,
            EmergencyStop::Inactive.as_byte(),
        );
    }

    /// Read the emergency-stop latch
    ///
    /// Erased memory reads Inactive by construction: the inactive
    /// sentinel is the erased fill byte.
    pub fn emergency(&mut self) -> EmergencyStop {
        EmergencyStop::from_byte(self.memory.read_byte(layout::ADDR_EMERGENCY_STOP))
    }

    /// Persist the Z-probe offset in mm
    pub fn set_zprobe_offset(&mut self, offset_mm: f32) {
        self.memory
            .write_bytes(layout::ADDR_ZPROBE_OFFSET, &offset_mm.to_le_bytes());
    }

    /// Read the Z-probe offset in mm
    ///
    /// Values outside `[ZPROBE_OFFSET_MIN_MM, ZPROBE_OFFSET_MAX_MM]`
    /// (including NaN from corrupt bytes) yield the configured fallback.
    pub fn zprobe_offset(&mut self) -> f32 {
        let mut raw = [0u8; 4];
        self.memory.read_bytes(layout::ADDR_ZPROBE_OFFSET, &mut raw);

        let offset_mm = f32::from_le_bytes(raw);
        if (ZPROBE_OFFSET_MIN_MM..=ZPROBE_OFFSET_MAX_MM).contains(&offset_mm) {
            offset_mm
        } else {
            self.config.zprobe_fallback_mm
        }
    }

    /// Mark the store as having completed first-power-on initialization
    pub fn set_initialized(&mut self) {
        self.memory
            .write_byte(layout::ADDR_FIRST_POWER_ON, INITIALIZED);
    }

    /// Reset the first-power-on flag
    pub fn set_uninitialized(&mut self) {
        self.memory
            .write_byte(layout::ADDR_FIRST_POWER_ON, UNINITIALIZED);
    }

    /// Check whether first-power-on initialization has run
    pub fn initialized(&mut self) -> bool {
        self.memory.read_byte(layout::ADDR_FIRST_POWER_ON) == INITIALIZED
    }

    /// Persist the display language
    #[cfg(feature = "display")]
    pub fn set_language(&mut self, language: Language) {
        self.memory
            .write_byte(layout::ADDR_LANGUAGE, language.index());
    }

    /// Read the display language; unknown indices fall back to English
    #[cfg(feature = "display")]
    pub fn language(&mut self) -> Language {
        Language::from_index(self.memory.read_byte(layout::ADDR_LANGUAGE))
    }

    /// Persist the chamber light mode
    pub fn set_light_mode(&mut self, mode: LightMode) {
        self.memory.write_byte(layout::ADDR_LIGHT, mode.as_byte());
    }

    /// Read the chamber light mode; unknown bytes fall back to Auto
    pub fn light_mode(&mut self) -> LightMode {
        LightMode::from_byte(self.memory.read_byte(layout::ADDR_LIGHT))
    }

    /// Persist the box-fan enable
    pub fn set_box_fan(&mut self, enabled: bool) {
        self.memory.write_byte(layout::ADDR_BOX_FAN, enabled as u8);
    }

    /// Read the box-fan enable; only the exact disabled sentinel reads
    /// false, so an erased store leaves the fan on
    pub fn box_fan(&mut self) -> bool {
        self.memory.read_byte(layout::ADDR_BOX_FAN) != BOX_FAN_DISABLED
    }

    /// Persist the autolevel enable
    pub fn set_autolevel(&mut self, enabled: bool) {
        self.memory
            .write_byte(layout::ADDR_AUTOLEVEL, enabled as u8);
    }

    /// Read the autolevel enable; anything but the exact on sentinel
    /// reads false
    pub fn autolevel(&mut self) -> bool {
        self.memory.read_byte(layout::ADDR_AUTOLEVEL) == AUTOLEVEL_ON
    }

    /// Persist the serial-screen enable
    pub fn set_serial_screen(&mut self, enabled: bool) {
        self.memory
            .write_byte(layout::ADDR_SERIAL_SCREEN, enabled as u8);
    }

    /// Read the serial-screen enable; anything but the exact on sentinel
    /// reads false
    pub fn serial_screen(&mut self) -> bool {
        self.memory.read_byte(layout::ADDR_SERIAL_SCREEN) == SERIAL_SCREEN_ON
    }

    /// Erase and reinitialize the store
    ///
    /// Sequencing is mandatory: the state flag goes Disabled before the
    /// sweep, every byte below the protected zone is overwritten with the
    /// fill, the version is re-stamped (when configured), and only then
    /// does the flag return to Enabled. A crash anywhere in between
    /// leaves the flag Disabled, so the store reports untrustworthy until
    /// initialization is re-run.
    pub fn erase_all(&mut self) {
        self.set_state(StoreState::Disabled);

        for address in 0..layout::ADDR_PROTECTED_ZONE {
            self.memory.write_byte(address, layout::ERASE_FILL);
        }

        if let Some(version) = self.config.version {
            self.memory.write_byte(layout::ADDR_VERSION, version);
        }
        self.set_state(StoreState::Enabled);
    }

    /// Read the raw settings format version
    pub fn version(&mut self) -> u8 {
        self.memory.read_byte(layout::ADDR_VERSION)
    }

    /// Read the enable/disable state flag
    ///
    /// Disabled for every byte except the exact enabled sentinel,
    /// including the erased fill. Callers must not trust field values
    /// until Enabled is observed.
    pub fn state(&mut self) -> StoreState {
        StoreState::from_byte(self.memory.read_byte(layout::ADDR_STATE_FLAG))
    }

    fn set_state(&mut self, state: StoreState) {
        self.memory
            .write_byte(layout::ADDR_STATE_FLAG, state.as_byte());
    }

    /// Decode the board identity from the persisted family tag
    ///
    /// Unknown tags yield the RAMPS fallback identity.
    pub fn board_type(&mut self) -> BoardType {
        let mut tag = [0u8; layout::BOARD_TAG_LEN];
        self.memory.read_bytes(layout::ADDR_BOARD_FAMILY, &mut tag);
        BoardType::from_tag(&tag)
    }
}
