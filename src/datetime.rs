//! Gregorian calendar date/time value for the years 2000 to 9999.
//!
//! [`DateTime`] stores a civil timestamp without time zone or sub-second
//! precision. All arithmetic goes through a linear count of seconds since
//! `2000-01-01 00:00:00`, computed in 64 bits so that the whole year range is
//! covered without wraparound.
//!
//! # Out-of-range policy
//!
//! Every operation is total:
//! - [`DateTime::new`] clamps each field into its valid range.
//! - [`DateTime::add_seconds`] and [`DateTime::add_days`] saturate at
//!   [`DateTime::FIRST`] and [`DateTime::LAST`].
//! - The 32-bit accessors saturate at the limits of their integer type.
//!
//! Where a caller needs to know about a range violation, the `try_`/`checked_`
//! variants return a [`DateTimeError`] instead.

use crate::types::{DateTimeError, Format, Weekday};
use core::cmp::Ordering;
use core::fmt::{self, Write};
use core::hash::{Hash, Hasher};
use heapless::String;

/// First supported year.
pub const MIN_YEAR: u16 = 2000;

/// Last supported year.
pub const MAX_YEAR: u16 = 9999;

/// Seconds between `1970-01-01 00:00:00` and `2000-01-01 00:00:00`.
pub const UNIX_EPOCH_OFFSET: u32 = 0x386D_4380;

/// Capacity of the string returned by [`DateTime::format`].
pub const FORMAT_CAPACITY: usize = 19;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_DAY: u32 = 86_400;
const DAYS_PER_400_YEARS: u32 = 146_097;

// 2000-01-01 was a Saturday.
const EPOCH_DAY_OF_WEEK: u8 = Weekday::Saturday as u8;

const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Seconds from the epoch to `9999-12-31 23:59:59`.
const LAST_SECONDS: u64 = days_before_year(MAX_YEAR + 1) as u64 * SECONDS_PER_DAY as u64 - 1;

/// Returns `true` if `year` is a leap year in the Gregorian calendar.
#[inline]
pub const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `year`.
#[inline]
pub const fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Returns the number of days in `month` of `year`.
///
/// Returns 0 for a month outside 1-12.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_PER_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

/// Whole days from `2000-01-01` to January 1st of `year`.
const fn days_before_year(year: u16) -> u32 {
    if year <= MIN_YEAR {
        return 0;
    }
    let previous = (year - 1) as u32;
    let base = (MIN_YEAR - 1) as u32;
    let leap_days = (previous / 4 - previous / 100 + previous / 400) - (base / 4 - base / 100 + base / 400);
    (year - MIN_YEAR) as u32 * 365 + leap_days
}

/// Whole days from January 1st to the first of `month` within `year`.
const fn days_before_month(year: u16, month: u8) -> u32 {
    let mut days = 0;
    let mut m = 1;
    while m < month {
        days += days_in_month(year, m) as u32;
        m += 1;
    }
    days
}

const fn days_since_epoch(year: u16, month: u8, day: u8) -> u32 {
    days_before_year(year) + days_before_month(year, month) + day.saturating_sub(1) as u32
}

/// The only place a day of week is derived. Both the validated constructor
/// and the epoch decoder go through here.
const fn day_of_week_after(days: u32) -> u8 {
    ((EPOCH_DAY_OF_WEEK as u32 + days % 7) % 7) as u8
}

/// A date and time in the Gregorian calendar, from `2000-01-01 00:00:00`
/// to `9999-12-31 23:59:59`.
///
/// The day of week is derived from the date when the value is created and
/// stored alongside it. It uses `0 = Sunday` to `6 = Saturday`, see
/// [`Weekday`].
///
/// Equality, ordering and hashing only look at the calendar fields; the stored
/// day of week is ignored.
///
/// Values are immutable. Operations such as [`add_days`](Self::add_days)
/// return a new value.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    day_of_week: u8,
}

impl DateTime {
    /// `2000-01-01 00:00:00`, a Saturday.
    pub const FIRST: DateTime = DateTime {
        year: MIN_YEAR,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        day_of_week: EPOCH_DAY_OF_WEEK,
    };

    /// `9999-12-31 23:59:59`, a Friday.
    pub const LAST: DateTime = DateTime {
        year: MAX_YEAR,
        month: 12,
        day: 31,
        hour: 23,
        minute: 59,
        second: 59,
        day_of_week: Weekday::Friday as u8,
    };

    /// Creates a date/time from the given fields, clamping each into range.
    ///
    /// The year is clamped to 2000-9999, the month to 1-12, the day to the
    /// length of that month (so `2100-02-29` becomes `2100-02-28`), the hour
    /// to 0-23 and minute and second to 0-59. The day of week is calculated.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));
        Self::from_valid_fields(year, month, day, hour.min(23), minute.min(59), second.min(59))
    }

    /// Creates a date at midnight, clamping like [`new`](Self::new).
    pub fn from_date(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Creates a date/time from the given fields, rejecting any value out of range.
    ///
    /// # Errors
    /// Returns the first offending field, checked in the order year, month,
    /// day, hour, minute, second.
    pub fn try_new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DateTimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateTimeError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(DateTimeError::MonthOutOfRange(month));
        }
        let max = days_in_month(year, month);
        if day == 0 || day > max {
            return Err(DateTimeError::DayOutOfRange { day, max });
        }
        if hour > 23 {
            return Err(DateTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(DateTimeError::MinuteOutOfRange(minute));
        }
        if second > 59 {
            return Err(DateTimeError::SecondOutOfRange(second));
        }
        Ok(Self::from_valid_fields(year, month, day, hour, minute, second))
    }

    /// Creates a date/time from raw values without any check.
    ///
    /// Meant for trusted sources such as the RTC registers, where the values
    /// are already known to be in range. Nothing is validated and the day of
    /// week is stored as given.
    ///
    /// Passing inconsistent values does not cause undefined behaviour, but
    /// every later result (conversion, arithmetic, ordering against other
    /// values) is unspecified.
    pub const fn from_unchecked_values(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        day_of_week: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            day_of_week,
        }
    }

    fn from_valid_fields(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            day_of_week: day_of_week_after(days_since_epoch(year, month, day)),
        }
    }

    /// Returns a copy with the date replaced, clamping like [`new`](Self::new).
    pub fn with_date(self, year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, self.hour, self.minute, self.second)
    }

    /// Returns a copy with the time replaced, clamping like [`new`](Self::new).
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Self {
        Self::new(self.year, self.month, self.day, hour, minute, second)
    }

    /// Year, 2000-9999.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month, 1 = January to 12 = December.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month, 1-31.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Hour, 0-23.
    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59.
    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, 0-59.
    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Day of the week, 0 = Sunday to 6 = Saturday.
    #[inline]
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Day of the week as a [`Weekday`].
    pub const fn weekday(&self) -> Weekday {
        match Weekday::from_index(self.day_of_week % 7) {
            Some(day) => day,
            None => Weekday::Sunday,
        }
    }

    /// Returns `true` for `2000-01-01 00:00:00`.
    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    /// Seconds since `2000-01-01 00:00:00`.
    ///
    /// A `u32` reaches up to `2136-02-07 06:28:15`. Later instants saturate to
    /// `u32::MAX`; use [`to_seconds_since_2000_u64`](Self::to_seconds_since_2000_u64)
    /// for the full range.
    pub fn to_seconds_since_2000(&self) -> u32 {
        u32::try_from(self.to_seconds_since_2000_u64()).unwrap_or(u32::MAX)
    }

    /// Seconds since `2000-01-01 00:00:00`, exact for every supported year.
    pub fn to_seconds_since_2000_u64(&self) -> u64 {
        let days = days_since_epoch(self.year, self.month, self.day);
        let time = self.hour as u32 * SECONDS_PER_HOUR
            + self.minute as u32 * SECONDS_PER_MINUTE
            + self.second as u32;
        days as u64 * SECONDS_PER_DAY as u64 + time as u64
    }

    /// Creates the date/time `seconds` after `2000-01-01 00:00:00`.
    ///
    /// Every `u32` maps to a valid value; `u32::MAX` is `2136-02-07 06:28:15`.
    pub fn from_seconds_since_2000(seconds: u32) -> Self {
        Self::from_epoch_seconds(seconds as u64)
    }

    /// Creates the date/time `seconds` after `2000-01-01 00:00:00`.
    ///
    /// Values past [`DateTime::LAST`] saturate to it.
    pub fn from_seconds_since_2000_u64(seconds: u64) -> Self {
        Self::from_epoch_seconds(seconds.min(LAST_SECONDS))
    }

    /// Seconds since `1970-01-01 00:00:00`.
    pub fn to_unix_timestamp(&self) -> u64 {
        self.to_seconds_since_2000_u64() + UNIX_EPOCH_OFFSET as u64
    }

    /// Creates a date/time from a unix timestamp.
    ///
    /// Timestamps before 2000 saturate to [`DateTime::FIRST`], timestamps past
    /// 9999 to [`DateTime::LAST`].
    pub fn from_unix_timestamp(timestamp: u64) -> Self {
        Self::from_seconds_since_2000_u64(timestamp.saturating_sub(UNIX_EPOCH_OFFSET as u64))
    }

    /// Decodes seconds since the epoch. `seconds` must not exceed `LAST_SECONDS`.
    fn from_epoch_seconds(seconds: u64) -> Self {
        let days = (seconds / SECONDS_PER_DAY as u64) as u32;
        let time = (seconds % SECONDS_PER_DAY as u64) as u32;

        // 2000 starts a 400-year cycle, so whole cycles can be skipped at once.
        let mut remaining = days % DAYS_PER_400_YEARS;
        let mut year = MIN_YEAR + (days / DAYS_PER_400_YEARS * 400) as u16;
        loop {
            let length = days_in_year(year) as u32;
            if remaining < length {
                break;
            }
            remaining -= length;
            year += 1;
        }

        let mut month = 1;
        loop {
            let length = days_in_month(year, month) as u32;
            if remaining < length {
                break;
            }
            remaining -= length;
            month += 1;
        }

        Self {
            year,
            month,
            day: remaining as u8 + 1,
            hour: (time / SECONDS_PER_HOUR) as u8,
            minute: (time % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            second: (time % SECONDS_PER_MINUTE) as u8,
            day_of_week: day_of_week_after(days),
        }
    }

    /// Returns this date/time moved by `seconds`, saturating at
    /// [`DateTime::FIRST`] and [`DateTime::LAST`].
    pub fn add_seconds(self, seconds: i32) -> Self {
        self.saturating_offset(i64::from(seconds))
    }

    /// Returns this date/time moved by `days`, keeping the time of day.
    ///
    /// Saturates at [`DateTime::FIRST`] and [`DateTime::LAST`]; a saturated
    /// result carries the boundary's time of day.
    pub fn add_days(self, days: i32) -> Self {
        self.saturating_offset(i64::from(days) * SECONDS_PER_DAY as i64)
    }

    /// Like [`add_seconds`](Self::add_seconds), but fails instead of saturating.
    ///
    /// # Errors
    /// [`DateTimeError::OutOfRange`] if the result is outside 2000-9999.
    pub fn checked_add_seconds(self, seconds: i32) -> Result<Self, DateTimeError> {
        self.checked_offset(i64::from(seconds))
    }

    /// Like [`add_days`](Self::add_days), but fails instead of saturating.
    ///
    /// # Errors
    /// [`DateTimeError::OutOfRange`] if the result is outside 2000-9999.
    pub fn checked_add_days(self, days: i32) -> Result<Self, DateTimeError> {
        self.checked_offset(i64::from(days) * SECONDS_PER_DAY as i64)
    }

    fn saturating_offset(self, delta: i64) -> Self {
        let total = (self.to_seconds_since_2000_u64() as i64)
            .saturating_add(delta)
            .clamp(0, LAST_SECONDS as i64);
        Self::from_epoch_seconds(total as u64)
    }

    fn checked_offset(self, delta: i64) -> Result<Self, DateTimeError> {
        let total = (self.to_seconds_since_2000_u64() as i64)
            .checked_add(delta)
            .ok_or(DateTimeError::OutOfRange)?;
        if !(0..=LAST_SECONDS as i64).contains(&total) {
            return Err(DateTimeError::OutOfRange);
        }
        Ok(Self::from_epoch_seconds(total as u64))
    }

    /// Seconds from this date/time to `other`, negative if `other` is earlier.
    ///
    /// An `i32` only covers about 68 years in each direction. Larger
    /// differences saturate to `i32::MIN` or `i32::MAX`; use
    /// [`seconds_to_i64`](Self::seconds_to_i64) when that matters.
    pub fn seconds_to(&self, other: &DateTime) -> i32 {
        let difference = self.seconds_to_i64(other);
        i32::try_from(difference).unwrap_or(if difference < 0 { i32::MIN } else { i32::MAX })
    }

    /// Seconds from this date/time to `other`, exact over the whole range.
    pub fn seconds_to_i64(&self, other: &DateTime) -> i64 {
        other.to_seconds_since_2000_u64() as i64 - self.to_seconds_since_2000_u64() as i64
    }

    /// Writes this date/time to `out` in the given layout.
    pub fn write_formatted<W: Write>(&self, out: &mut W, format: Format) -> fmt::Result {
        match format {
            Format::Iso => write!(
                out,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            ),
            Format::Long => write!(
                out,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            ),
            Format::IsoDate => write!(out, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
            Format::IsoBasicDate => write!(out, "{:04}{:02}{:02}", self.year, self.month, self.day),
            Format::IsoTime => write!(out, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second),
            Format::IsoBasicTime => write!(out, "{:02}{:02}{:02}", self.hour, self.minute, self.second),
            Format::ShortDate => write!(out, "{:02}.{:02}.", self.day, self.month),
            Format::ShortTime => write!(out, "{:02}:{:02}", self.hour, self.minute),
        }
    }

    /// Formats this date/time into a fixed-capacity string.
    ///
    /// Values built with [`from_unchecked_values`](Self::from_unchecked_values)
    /// whose fields have more digits than the layout are truncated.
    pub fn format(&self, format: Format) -> String<FORMAT_CAPACITY> {
        let mut text = String::new();
        // Valid values always fit, the longest layout has 19 characters.
        let _ = self.write_formatted(&mut text, format);
        text
    }

    fn sort_key(&self) -> (u16, u8, u8, u8, u8, u8) {
        (self.year, self.month, self.day, self.hour, self.minute, self.second)
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::FIRST
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_formatted(f, Format::Iso)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2004));
        assert!(is_leap_year(2400));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2001));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 0), 0);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn days_before_year_counts_leap_days() {
        assert_eq!(days_before_year(2000), 0);
        assert_eq!(days_before_year(2001), 366);
        assert_eq!(days_before_year(2004), 366 + 3 * 365);
        // 2000..2100 holds 25 leap years
        assert_eq!(days_before_year(2100), 100 * 365 + 25);
        assert_eq!(days_before_year(2400), DAYS_PER_400_YEARS);
    }

    #[test]
    fn last_seconds_matches_last() {
        assert_eq!(LAST_SECONDS, 252_455_615_999);
        assert_eq!(DateTime::LAST.to_seconds_since_2000_u64(), LAST_SECONDS);
    }

    #[test]
    fn day_of_week_is_anchored_at_saturday() {
        assert_eq!(day_of_week_after(0), 6);
        assert_eq!(day_of_week_after(1), 0);
        assert_eq!(day_of_week_after(7), 6);
    }

    #[test]
    fn boundary_constants_have_derived_weekday() {
        assert_eq!(
            DateTime::new(2000, 1, 1, 0, 0, 0).day_of_week(),
            DateTime::FIRST.day_of_week()
        );
        assert_eq!(
            DateTime::new(9999, 12, 31, 23, 59, 59).day_of_week(),
            DateTime::LAST.day_of_week()
        );
    }

    #[test]
    fn unchecked_garbage_does_not_panic() {
        let odd = DateTime::from_unchecked_values(65535, 200, 0, 99, 99, 99, 42);
        let _ = odd.to_seconds_since_2000();
        let _ = odd.add_days(1);
        let _ = odd.format(Format::Iso);
        assert_eq!(odd.weekday(), Weekday::Sunday);
    }
}
