//! Wall-clock sampling for the horloge clocks.
//!
//! A [`TimeSample`] is one reading of the local clock. Everything the two
//! displays show is derived from it:
//! - [`format`] turns it into the `HH:MM:SS AM` readout and the date line
//! - [`HandAngles`] turns it into clockwise hand angles for the analog face
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horloge_time::{format, HandAngles, TimeSample};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
//! let s = TimeSample::new(date, 13, 5, 9, 0).unwrap();
//!
//! assert_eq!(format::digital(&s), "01:05:09 PM");
//! assert!((HandAngles::from_sample(&s).hour - 32.575).abs() < 1e-9);
//! ```

mod angles;
mod error;
pub mod format;
mod sample;
mod source;

pub use angles::HandAngles;
pub use error::TimeError;
pub use sample::{Meridiem, TimeSample};
pub use source::{LocalClock, TimeSource};
