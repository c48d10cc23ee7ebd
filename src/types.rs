//! Core value types shared by the calendar engine and the clock driver.

/// Day of the week.
///
/// Numbered from `Sunday = 0` to `Saturday = 6`. This numbering is used
/// everywhere a day of week is stored as an integer, including
/// [`DateTime::day_of_week`](crate::DateTime::day_of_week).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Returns the weekday for an index in `0..=6`, or `None` otherwise.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Weekday::Sunday),
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            _ => None,
        }
    }

    /// Returns the index of this weekday (`Sunday = 0`).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the following day, wrapping from Saturday to Sunday.
    pub const fn succ(self) -> Self {
        match self {
            Weekday::Sunday => Weekday::Monday,
            Weekday::Monday => Weekday::Tuesday,
            Weekday::Tuesday => Weekday::Wednesday,
            Weekday::Wednesday => Weekday::Thursday,
            Weekday::Thursday => Weekday::Friday,
            Weekday::Friday => Weekday::Saturday,
            Weekday::Saturday => Weekday::Sunday,
        }
    }
}

/// Text layouts supported by [`DateTime::format`](crate::DateTime::format).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Format {
    /// `yyyy-MM-ddThh:mm:ss`
    Iso,

    /// `yyyy-MM-dd hh:mm:ss`
    Long,

    /// `yyyy-MM-dd`
    IsoDate,

    /// `yyyyMMdd`
    IsoBasicDate,

    /// `hh:mm:ss`
    IsoTime,

    /// `hhmmss`
    IsoBasicTime,

    /// `dd.MM.`
    ShortDate,

    /// `hh:mm`
    ShortTime,
}

/// Date/time validation and range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// Year outside 2000-9999.
    YearOutOfRange(u16),

    /// Month outside 1-12.
    MonthOutOfRange(u8),

    /// Day outside `1..=max` for the given year and month.
    DayOutOfRange {
        day: u8,
        max: u8,
    },

    /// Hour outside 0-23.
    HourOutOfRange(u8),

    /// Minute outside 0-59.
    MinuteOutOfRange(u8),

    /// Second outside 0-59.
    SecondOutOfRange(u8),

    /// Arithmetic result before 2000-01-01 00:00:00 or after 9999-12-31 23:59:59.
    OutOfRange,
}

impl core::fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DateTimeError::YearOutOfRange(year) => {
                write!(f, "year {} out of range (must be 2000-9999)", year)
            }
            DateTimeError::MonthOutOfRange(month) => {
                write!(f, "month {} out of range (must be 1-12)", month)
            }
            DateTimeError::DayOutOfRange { day, max } => {
                write!(f, "day {} out of range (must be 1-{})", day, max)
            }
            DateTimeError::HourOutOfRange(hour) => {
                write!(f, "hour {} out of range (must be 0-23)", hour)
            }
            DateTimeError::MinuteOutOfRange(minute) => {
                write!(f, "minute {} out of range (must be 0-59)", minute)
            }
            DateTimeError::SecondOutOfRange(second) => {
                write!(f, "second {} out of range (must be 0-59)", second)
            }
            DateTimeError::OutOfRange => {
                write!(f, "date/time outside 2000-01-01 00:00:00 to 9999-12-31 23:59:59")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DateTimeError {}
