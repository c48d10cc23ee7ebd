#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DateTime`**: A Gregorian date/time from 2000 to 9999 with validated and unchecked construction
//! - **`Weekday`**: Day of week, numbered `Sunday = 0` to `Saturday = 6`
//! - **`Format`**: Fixed text layouts for rendering a `DateTime`
//! - **`RealTimeClock`**: Trait to implement for your clock hardware
//! - **`Ds3231`**: Driver for the DS3231 I2C real-time clock
//! - **`Rgbw`**: 4-channel byte color with mixing, dimming and gamma correction
//!
//! All date/time arithmetic is done on seconds since `2000-01-01 00:00:00`.
//! Operations never wrap: out-of-range results saturate at `DateTime::FIRST` and
//! `DateTime::LAST`, and the `try_`/`checked_` variants report a `DateTimeError`.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod clock;
pub mod colors;
pub mod datetime;
pub mod ds3231;
pub mod types;

pub use clock::RealTimeClock;
pub use colors::Rgbw;
pub use datetime::{DateTime, MAX_YEAR, MIN_YEAR, UNIX_EPOCH_OFFSET};
pub use ds3231::Ds3231;
pub use types::{DateTimeError, Format, Weekday};
