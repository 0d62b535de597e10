//! AT24-family I2C serial EEPROM driver
//!
//! Implements `ByteMemory` for the 4 KiB AT24C32-class parts fitted on
//! the supported controller boards. The part NACKs its bus address for
//! the duration of an internal write cycle, so readiness polling is an
//! addressing attempt repeated until the device acknowledges. That loop
//! lives here, keeping the settings logic free of timing concerns.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use mneme_core::settings::layout::ERASE_FILL;
use mneme_core::traits::ByteMemory;

/// Default 7-bit bus address (A2..A0 strapped low)
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Capacity of the AT24C32 parts the boards ship with
pub const DEFAULT_CAPACITY: usize = 4096;

/// Pause between readiness polls; a write cycle lasts up to ~5 ms
const POLL_INTERVAL_US: u32 = 100;

/// AT24-family I2C EEPROM
///
/// `read_byte` and `write_byte` retry the bus transfer until the device
/// acknowledges, satisfying the blocking `ByteMemory` contract. The wait
/// is unbounded unless a poll budget is set; the budget exists for test
/// and bring-up scenarios where a wedged bus must not hang the caller.
pub struct At24<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    capacity: usize,
    poll_budget: Option<u32>,
}

impl<I2C: I2c, D: DelayNs> At24<I2C, D> {
    /// Create a driver for a 4 KiB part at the default address
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            capacity: DEFAULT_CAPACITY,
            poll_budget: None,
        }
    }

    /// Use a non-default bus address (A2..A0 strapping)
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a non-default part capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Cap readiness polling at `attempts` per operation
    ///
    /// When the budget runs out, a read yields the erased fill byte and
    /// a write is dropped. Production configurations leave the budget
    /// unset: the device always becomes ready within one write cycle.
    pub fn with_poll_budget(mut self, attempts: u32) -> Self {
        self.poll_budget = Some(attempts);
        self
    }

    /// Release the bus and delay resources
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn out_of_budget(&mut self, attempts: &mut u32) -> bool {
        *attempts += 1;
        match self.poll_budget {
            Some(budget) => *attempts >= budget,
            None => false,
        }
    }
}

impl<I2C: I2c, D: DelayNs> ByteMemory for At24<I2C, D> {
    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probe the device with an empty addressing cycle
    fn is_ready(&mut self) -> bool {
        self.i2c.write(self.address, &[]).is_ok()
    }

    fn read_byte(&mut self, address: u16) -> u8 {
        let pointer = address.to_be_bytes();
        let mut data = [0u8; 1];
        let mut attempts = 0;

        loop {
            match self.i2c.write_read(self.address, &pointer, &mut data) {
                Ok(()) => return data[0],
                Err(_) => {
                    if self.out_of_budget(&mut attempts) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("at24: read poll budget exhausted at {=u16:#x}", address);
                        return ERASE_FILL;
                    }
                    self.delay.delay_us(POLL_INTERVAL_US);
                }
            }
        }
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        let pointer = address.to_be_bytes();
        let frame = [pointer[0], pointer[1], value];
        let mut attempts = 0;

        loop {
            match self.i2c.write(self.address, &frame) {
                Ok(()) => return,
                Err(_) => {
                    if self.out_of_budget(&mut attempts) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("at24: write poll budget exhausted at {=u16:#x}", address);
                        return;
                    }
                    self.delay.delay_us(POLL_INTERVAL_US);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use mneme_core::settings::{LightMode, SettingsStore};

    #[derive(Debug)]
    struct BusFault;

    impl embedded_hal::i2c::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    /// Bus-level EEPROM model: word-address pointer, sequential reads,
    /// and a write cycle during which the device NACKs everything
    struct FakeBus {
        bytes: [u8; DEFAULT_CAPACITY],
        pointer: u16,
        busy: u32,
        busy_per_write: u32,
        nacks: u32,
        last_write_frame: [u8; 3],
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                bytes: [ERASE_FILL; DEFAULT_CAPACITY],
                pointer: 0,
                busy: 0,
                busy_per_write: 0,
                nacks: 0,
                last_write_frame: [0; 3],
            }
        }

        fn with_write_cycle(polls: u32) -> Self {
            Self {
                busy_per_write: polls,
                ..Self::new()
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = BusFault;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), BusFault> {
            if self.busy > 0 {
                self.busy -= 1;
                self.nacks += 1;
                return Err(BusFault);
            }

            let mut wrote_data = false;
            for op in operations {
                match op {
                    Operation::Write(bytes) => match bytes.len() {
                        0 => {} // ack probe
                        2 => self.pointer = u16::from_be_bytes([bytes[0], bytes[1]]),
                        _ => {
                            self.pointer = u16::from_be_bytes([bytes[0], bytes[1]]);
                            for &byte in &bytes[2..] {
                                self.bytes[self.pointer as usize] = byte;
                                self.pointer = self.pointer.wrapping_add(1);
                            }
                            if bytes.len() == 3 {
                                self.last_write_frame.copy_from_slice(&bytes[..]);
                            }
                            wrote_data = true;
                        }
                    },
                    Operation::Read(buffer) => {
                        for slot in buffer.iter_mut() {
                            *slot = self.bytes[self.pointer as usize];
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
            }

            if wrote_data {
                self.busy = self.busy_per_write;
            }
            Ok(())
        }
    }

    /// DelayNs that returns immediately
    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_byte_roundtrip() {
        let mut eeprom = At24::new(FakeBus::new(), NoDelay);

        eeprom.write_byte(499, 0x00);
        assert_eq!(eeprom.read_byte(499), 0x00);
        assert_eq!(eeprom.read_byte(500), ERASE_FILL);
    }

    #[test]
    fn test_write_frame_is_pointer_then_data() {
        let mut eeprom = At24::new(FakeBus::new(), NoDelay);

        eeprom.write_byte(0x0123, 0xAB);

        let (bus, _) = eeprom.release();
        assert_eq!(bus.last_write_frame, [0x01, 0x23, 0xAB]);
    }

    #[test]
    fn test_ack_polling_waits_out_the_write_cycle() {
        let mut eeprom = At24::new(FakeBus::with_write_cycle(3), NoDelay);

        eeprom.write_byte(100, 0x11);
        // The next operation has to poll through the write cycle
        assert_eq!(eeprom.read_byte(100), 0x11);

        let (bus, _) = eeprom.release();
        assert_eq!(bus.nacks, 3);
    }

    #[test]
    fn test_is_ready_reflects_the_write_cycle() {
        let mut eeprom = At24::new(FakeBus::with_write_cycle(1), NoDelay);
        assert!(eeprom.is_ready());

        eeprom.write_byte(0, 0x00);
        assert!(!eeprom.is_ready());
        // The failed probe consumed the busy period
        assert!(eeprom.is_ready());
    }

    #[test]
    fn test_poll_budget_gives_up() {
        let mut bus = FakeBus::new();
        bus.busy = u32::MAX; // never becomes ready
        let mut eeprom = At24::new(bus, NoDelay).with_poll_budget(4);

        assert_eq!(eeprom.read_byte(232), ERASE_FILL);
        eeprom.write_byte(232, 0x55); // dropped, must not hang

        let (bus, _) = eeprom.release();
        assert_eq!(bus.nacks, 8);
        assert_eq!(bus.bytes[232], ERASE_FILL);
    }

    #[test]
    fn test_settings_store_over_at24() {
        let eeprom = At24::new(FakeBus::with_write_cycle(2), NoDelay);
        let mut store = SettingsStore::new(eeprom);

        store.set_zprobe_offset(4.2);
        store.set_light_mode(LightMode::On);
        store.set_emergency();

        assert_eq!(store.zprobe_offset(), 4.2);
        assert_eq!(store.light_mode(), LightMode::On);
        assert!(store.emergency().is_active());
    }
}
