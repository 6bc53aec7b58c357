//! Text renderings of a [`TimeSample`].

use crate::TimeSample;

/// 12-hour digital readout, e.g. `01:05:09 PM`.
pub fn digital(sample: &TimeSample) -> String {
    format!(
        "{:02}:{:02}:{:02} {}",
        sample.hour12(),
        sample.minute(),
        sample.second(),
        sample.meridiem()
    )
}

/// Long date line, e.g. `Tuesday, 14 October 2025`.
pub fn date_line(sample: &TimeSample) -> String {
    sample.date().format("%A, %d %B %Y").to_string()
}
