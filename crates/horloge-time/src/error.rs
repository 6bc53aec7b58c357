use thiserror::Error;

/// A time component outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("hour {0} out of range (0-23)")]
    Hour(u32),
    #[error("minute {0} out of range (0-59)")]
    Minute(u32),
    #[error("second {0} out of range (0-59)")]
    Second(u32),
    #[error("microsecond {0} out of range (0-999999)")]
    Micros(u32),
}
