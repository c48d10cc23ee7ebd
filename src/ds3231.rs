//! Driver for the DS3231 I2C real-time clock.
//!
//! Provides [`Ds3231`], which exchanges [`DateTime`] values with the chip's
//! BCD time registers and gives raw access to every other register. The
//! driver owns its bus handle and works with any [`embedded_hal::i2c::I2c`]
//! implementation.
//!
//! The chip stores the year as two BCD digits plus a century bit, so it covers
//! 200 years. The first of those years is the *year base*, configured per
//! driver instance (2000 by default).

use crate::clock::RealTimeClock;
use crate::datetime::DateTime;
use embedded_hal::i2c::I2c;
use heapless::Vec;

/// Fixed I2C address of the DS3231.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Year base used by [`Ds3231::new`].
pub const DEFAULT_YEAR_BASE: u16 = 2000;

/// Number of registers in the chip (0x00 to 0x12).
pub const REGISTER_COUNT: usize = 0x13;

// Register address byte followed by at most every register.
const FRAME_CAPACITY: usize = REGISTER_COUNT + 1;

const CENTURY_BIT: u8 = 1 << 7;

/// Registers of the DS3231.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Seconds = 0x00,
    Minutes = 0x01,
    Hours = 0x02,
    DayOfWeek = 0x03,
    Day = 0x04,
    MonthCentury = 0x05,
    Year = 0x06,
    Alarm1Seconds = 0x07,
    Alarm1Minutes = 0x08,
    Alarm1Hours = 0x09,
    Alarm1DayDate = 0x0a,
    Alarm2Minutes = 0x0b,
    Alarm2Hours = 0x0c,
    Alarm2DayDate = 0x0d,
    Control = 0x0e,
    Status = 0x0f,
    AgingOffset = 0x10,
    TemperatureHigh = 0x11,
    TemperatureLow = 0x12,
}

/// Flags of the control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Control {
    /// Alarm 1 interrupt enable.
    A1IE = 1 << 0,
    /// Alarm 2 interrupt enable.
    A2IE = 1 << 1,
    /// Interrupt control.
    INTCN = 1 << 2,
    /// Rate select 1.
    RS1 = 1 << 3,
    /// Rate select 2.
    RS2 = 1 << 4,
    /// Convert temperature.
    CONV = 1 << 5,
    /// Battery-backed square-wave enable.
    BBSQW = 1 << 6,
    /// Enable oscillator (active low).
    EOSC = 1 << 7,
}

/// Flags of the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Alarm 1 flag.
    A1F = 1 << 0,
    /// Alarm 2 flag.
    A2F = 1 << 1,
    /// Busy.
    BSY = 1 << 2,
    /// Enable 32kHz output.
    EN32kHz = 1 << 3,
    /// Oscillator stop flag.
    OSF = 1 << 7,
}

/// Errors that can occur during driver operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The I2C bus reported an error.
    I2c(E),
    /// The year cannot be stored with the configured year base.
    YearOutOfRange {
        /// The rejected year
        year: u16,
        /// First year the chip can hold; the last is `year_base + 199`
        year_base: u16,
    },
    /// A register write was longer than the register file.
    FrameTooLong,
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(error) => write!(f, "i2c error: {:?}", error),
            Error::YearOutOfRange { year, year_base } => {
                write!(
                    f,
                    "year {} cannot be stored (must be {}-{})",
                    year,
                    year_base,
                    u32::from(*year_base) + 199
                )
            }
            Error::FrameTooLong => write!(f, "register write exceeds the register file"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

#[inline]
fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd & 0x0f) + (bcd >> 4) * 10
}

#[inline]
fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

/// Driver for a DS3231 on an I2C bus.
///
/// # Type Parameters
/// * `I2C` - The bus implementation
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
    year_base: u16,
}

impl<I2C> Ds3231<I2C> {
    /// Creates a driver with the default address and year base 2000.
    pub fn new(i2c: I2C) -> Self {
        Self::with_year_base(i2c, DEFAULT_YEAR_BASE)
    }

    /// Creates a driver whose 200-year window starts at `year_base`.
    pub fn with_year_base(i2c: I2C, year_base: u16) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
            year_base,
        }
    }

    /// Uses a different bus address, e.g. behind an address translator.
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Returns the configured year base.
    pub fn year_base(&self) -> u16 {
        self.year_base
    }

    /// Returns the configured bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Reads the current date/time.
    pub fn datetime(&mut self) -> Result<DateTime, Error<I2C::Error>> {
        let mut raw = [0u8; 7];
        self.read_registers(Register::Seconds, &mut raw)?;

        let century = if raw[5] & CENTURY_BIT != 0 { 100 } else { 0 };
        let year = self
            .year_base
            .saturating_add(century + u16::from(bcd_to_bin(raw[6])));

        // The chip counts weekdays 1-7.
        let datetime = DateTime::from_unchecked_values(
            year,
            bcd_to_bin(raw[5] & 0x1f),
            bcd_to_bin(raw[4] & 0x3f),
            bcd_to_bin(raw[2] & 0x3f),
            bcd_to_bin(raw[1] & 0x7f),
            bcd_to_bin(raw[0] & 0x7f),
            (raw[3] & 0x07).saturating_sub(1),
        );

        #[cfg(feature = "defmt")]
        defmt::trace!("ds3231: read {}", datetime);

        Ok(datetime)
    }

    /// Sets the date/time, starts the oscillator and clears all status flags.
    ///
    /// # Errors
    /// * `YearOutOfRange` - The year is outside `year_base..year_base + 200`;
    ///   nothing is written
    /// * `I2c` - Bus failure
    pub fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Error<I2C::Error>> {
        let year = datetime.year();
        let offset = u32::from(year).wrapping_sub(u32::from(self.year_base));
        if year < self.year_base || offset >= 200 {
            #[cfg(feature = "defmt")]
            defmt::warn!("ds3231: year {} outside window of base {}", year, self.year_base);

            return Err(Error::YearOutOfRange {
                year,
                year_base: self.year_base,
            });
        }

        let century = if offset >= 100 { CENTURY_BIT } else { 0 };
        let registers = [
            bin_to_bcd(datetime.second()),
            bin_to_bcd(datetime.minute()),
            bin_to_bcd(datetime.hour()),
            datetime.day_of_week() % 7 + 1,
            bin_to_bcd(datetime.day()),
            bin_to_bcd(datetime.month()) | century,
            bin_to_bcd((offset % 100) as u8),
        ];
        self.write_registers(Register::Seconds, &registers)?;

        // EOSC is active low, so clearing the control register runs the oscillator.
        self.write_register(Register::Control, 0)?;
        self.write_register(Register::Status, 0)
    }

    /// Returns `true` unless the oscillator has stopped since the time was last set.
    pub fn is_running(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(!self.read_status(Status::OSF)?)
    }

    /// Reads the temperature in degrees Celsius, in 0.25 °C steps.
    pub fn temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        let mut raw = [0u8; 2];
        self.read_registers(Register::TemperatureHigh, &mut raw)?;
        // 10-bit two's complement: integer part in the high byte, quarters in bits 7-6 of the low byte.
        let quarters = (i16::from(raw[0] as i8) << 2) | i16::from(raw[1] >> 6);
        Ok(f32::from(quarters) * 0.25)
    }

    /// Reads every register in one transfer.
    pub fn register_dump(&mut self) -> Result<[u8; REGISTER_COUNT], Error<I2C::Error>> {
        let mut registers = [0u8; REGISTER_COUNT];
        self.read_registers(Register::Seconds, &mut registers)?;

        #[cfg(feature = "defmt")]
        for (index, value) in registers.iter().enumerate() {
            defmt::debug!("ds3231: {=u8:#x} = {=u8:#b} ({=u8:#x})", index as u8, *value, *value);
        }

        Ok(registers)
    }

    /// Reads a single register.
    pub fn read_register(&mut self, register: Register) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    /// Reads consecutive registers starting at `register` into `values`.
    pub fn read_registers(
        &mut self,
        register: Register,
        values: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[register as u8], values)
            .map_err(Error::I2c)
    }

    /// Writes a single register.
    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_registers(register, &[value])
    }

    /// Writes consecutive registers starting at `register`.
    ///
    /// # Errors
    /// * `FrameTooLong` - More values than registers
    /// * `I2c` - Bus failure
    pub fn write_registers(
        &mut self,
        register: Register,
        values: &[u8],
    ) -> Result<(), Error<I2C::Error>> {
        let mut frame: Vec<u8, FRAME_CAPACITY> = Vec::new();
        frame.push(register as u8).map_err(|_| Error::FrameTooLong)?;
        frame
            .extend_from_slice(values)
            .map_err(|_| Error::FrameTooLong)?;

        self.i2c.write(self.address, &frame).map_err(Error::I2c)
    }

    /// Replaces the bits selected by `mask` with those of `value`.
    pub fn write_register_masked(
        &mut self,
        register: Register,
        value: u8,
        mask: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(register)?;
        self.write_register(register, (current & !mask) | (value & mask))
    }

    /// Returns `true` if any bit of `mask` is set in `register`.
    pub fn read_flag(&mut self, register: Register, mask: u8) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_register(register)? & mask != 0)
    }

    /// Sets the bits of `mask` in `register`.
    pub fn set_flag(&mut self, register: Register, mask: u8) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(register)?;
        self.write_register(register, current | mask)
    }

    /// Clears the bits of `mask` in `register`.
    pub fn clear_flag(&mut self, register: Register, mask: u8) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(register)?;
        self.write_register(register, current & !mask)
    }

    /// Sets or clears the bits of `mask`. Skips the write if nothing changes.
    pub fn write_flag(
        &mut self,
        register: Register,
        mask: u8,
        enabled: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(register)?;
        let updated = if enabled { current | mask } else { current & !mask };
        if updated == current {
            return Ok(());
        }
        self.write_register(register, updated)
    }

    /// Reads a flag of the control register.
    pub fn read_control(&mut self, flag: Control) -> Result<bool, Error<I2C::Error>> {
        self.read_flag(Register::Control, flag as u8)
    }

    /// Reads a flag of the status register.
    pub fn read_status(&mut self, flag: Status) -> Result<bool, Error<I2C::Error>> {
        self.read_flag(Register::Status, flag as u8)
    }

    /// Sets or clears a flag of the control register.
    pub fn write_control(&mut self, flag: Control, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_flag(Register::Control, flag as u8, enabled)
    }

    /// Sets or clears a flag of the status register.
    pub fn write_status(&mut self, flag: Status, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_flag(Register::Status, flag as u8, enabled)
    }
}

impl<I2C: I2c> RealTimeClock for Ds3231<I2C> {
    type Error = Error<I2C::Error>;

    fn datetime(&mut self) -> Result<DateTime, Self::Error> {
        Ds3231::datetime(self)
    }

    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        Ds3231::set_datetime(self, datetime)
    }
}
