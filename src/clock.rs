//! Clock abstraction for platform-agnostic date/time sources.

use crate::datetime::DateTime;

/// Trait for abstracting battery-backed real-time clocks.
///
/// Implement this for your clock hardware so application code can read and
/// set the calendar time without knowing which chip is fitted.
pub trait RealTimeClock {
    /// Error reported by the underlying hardware access.
    type Error;

    /// Reads the current date/time.
    fn datetime(&mut self) -> Result<DateTime, Self::Error>;

    /// Sets the date/time and starts the clock.
    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;
}
