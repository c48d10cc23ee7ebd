//! Shared test infrastructure for rtc-calendar integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use rtc_calendar::DateTime;
use rtc_calendar::ds3231::{REGISTER_COUNT, Register};

// ============================================================================
// Mock I2C Bus
// ============================================================================

/// Mock DS3231 register file behind an I2C bus.
///
/// A write selects the register pointer with its first byte and stores the
/// remaining bytes from there on; a read continues from the pointer. Like the
/// chip, the pointer auto-increments.
pub struct MockI2c {
    registers: [u8; REGISTER_COUNT],
    pointer: usize,
    register_writes: usize,
    last_address: Option<u8>,
    fail: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            pointer: 0,
            register_writes: 0,
            last_address: None,
            fail: false,
        }
    }

    /// Presets a register without counting it as a write
    pub fn load(&mut self, register: Register, value: u8) {
        self.registers[register as usize] = value;
    }

    /// Presets consecutive registers starting at `register`
    pub fn load_all(&mut self, register: Register, values: &[u8]) {
        let start = register as usize;
        self.registers[start..start + values.len()].copy_from_slice(values);
    }

    pub fn register(&self, register: Register) -> u8 {
        self.registers[register as usize]
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Number of transactions that stored register data
    pub fn register_writes(&self) -> usize {
        self.register_writes
    }

    pub fn last_address(&self) -> Option<u8> {
        self.last_address
    }

    /// Makes every following transaction fail
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.last_address = Some(address);

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((first, rest)) = bytes.split_first() {
                        self.pointer = *first as usize;
                        if !rest.is_empty() {
                            self.register_writes += 1;
                        }
                        for value in rest {
                            self.registers[self.pointer % REGISTER_COUNT] = *value;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = self.registers[self.pointer % REGISTER_COUNT];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Calendar Helpers
// ============================================================================

/// Instants spread over the range representable in 32-bit seconds
pub fn sample_instants() -> Vec<DateTime> {
    let mut samples = vec![
        DateTime::FIRST,
        DateTime::new(2000, 2, 28, 23, 59, 59),
        DateTime::new(2000, 2, 29, 0, 0, 0),
        DateTime::new(2000, 12, 31, 23, 59, 59),
        DateTime::new(2001, 1, 1, 0, 0, 0),
        DateTime::new(2038, 1, 19, 3, 14, 7),
        DateTime::new(2099, 12, 31, 23, 59, 59),
        DateTime::new(2100, 2, 28, 12, 0, 0),
        DateTime::new(2100, 3, 1, 0, 0, 0),
        DateTime::new(2135, 12, 31, 23, 59, 59),
        DateTime::new(2136, 2, 7, 6, 28, 15),
    ];
    for year in (2000..2136).step_by(7) {
        let month = (year % 12) as u8 + 1;
        let day = (year % 28) as u8 + 1;
        samples.push(DateTime::new(year, month, day, (year % 24) as u8, (year % 60) as u8, 59));
    }
    samples
}

/// Recomputes the day of week through the validated constructor
pub fn expected_day_of_week(datetime: &DateTime) -> u8 {
    DateTime::new(
        datetime.year(),
        datetime.month(),
        datetime.day(),
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
    )
    .day_of_week()
}
