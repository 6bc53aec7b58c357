use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::TimeError;

const MAX_MICROS: u32 = 999_999;

/// Half of the 12-hour day.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One local wall-clock reading.
///
/// Invariant: every component is in range (`hour < 24`, `minute < 60`,
/// `second < 60`, `micros < 1_000_000`), so [`fraction`](Self::fraction) is
/// always in `[0, 1)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TimeSample {
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
    micros: u32,
}

impl TimeSample {
    /// Builds a sample from explicit components, rejecting out-of-range values.
    pub fn new(
        date: NaiveDate,
        hour: u32,
        minute: u32,
        second: u32,
        micros: u32,
    ) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeError::Minute(minute));
        }
        if second > 59 {
            return Err(TimeError::Second(second));
        }
        if micros > MAX_MICROS {
            return Err(TimeError::Micros(micros));
        }
        Ok(Self { date, hour, minute, second, micros })
    }

    /// Reads the components of `dt`.
    ///
    /// chrono represents a leap second as `nanosecond >= 1_000_000_000`; it is
    /// clamped to the last microsecond of the second.
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            date: dt.date(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            micros: (dt.nanosecond() / 1_000).min(MAX_MICROS),
        }
    }

    /// Reads the system's local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now().naive_local())
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub fn second(&self) -> u32 {
        self.second
    }

    #[inline]
    pub fn micros(&self) -> u32 {
        self.micros
    }

    /// Hour on the 12-hour dial: `hour mod 12`, with 0 shown as 12.
    pub fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.hour < 12 { Meridiem::Am } else { Meridiem::Pm }
    }

    /// Sub-second fraction in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.micros) / 1_000_000.0
    }
}
