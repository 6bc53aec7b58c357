use crate::TimeSample;

/// Where a display reads its time from.
///
/// The clocks take a source instead of calling [`TimeSample::now`] directly so
/// tick logic can be exercised with a fixed time. Any `Fn() -> TimeSample`
/// closure is a source.
pub trait TimeSource {
    fn sample(&self) -> TimeSample;
}

/// The system's local clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn sample(&self) -> TimeSample {
        TimeSample::now()
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> TimeSample,
{
    fn sample(&self) -> TimeSample {
        self()
    }
}
