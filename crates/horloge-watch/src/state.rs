use std::time::{Duration, Instant};

use horloge_engine::time::{Tick, Ticker};
use horloge_time::{TimeSample, TimeSource};

/// Run / stop state and tick schedule of the watch, independent of the window.
///
/// A frame calls [`begin_frame`](Self::begin_frame) before painting and
/// [`end_frame`](Self::end_frame) after presenting. The next tick is armed in
/// `end_frame`, so a tick is never scheduled while the previous one is still
/// being drawn.
#[derive(Debug)]
pub struct WatchState {
    running: bool,
    ticker: Ticker,
    sample: Option<TimeSample>,
    ticked: bool,
}

impl WatchState {
    /// A running watch whose first tick is due at `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        let mut ticker = Ticker::new(interval);
        ticker.arm_now(now);
        Self { running: true, ticker, sample: None, ticked: false }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The sample the current frame shows.
    #[inline]
    pub fn sample(&self) -> Option<&TimeSample> {
        self.sample.as_ref()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Resumes ticking with an immediate tick. No-op while already running,
    /// so a second tick chain can never start. Returns whether it started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.ticker.arm_now(now);
        log::debug!("watch started");
        true
    }

    /// Stops ticking. The pending tick is dropped and the last frame stays.
    /// Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.ticker.disarm();
        log::debug!("watch stopped after {} ticks", self.ticker.fired());
        true
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Takes a fresh sample if a tick is due. Repaints without a tick keep the
    /// previous sample; the very first frame samples regardless.
    pub fn begin_frame(&mut self, now: Instant, source: &impl TimeSource) -> Option<Tick> {
        let tick = self.ticker.poll(now);
        if tick.is_some() || self.sample.is_none() {
            self.sample = Some(source.sample());
        }
        self.ticked = tick.is_some();

        if let Some(t) = tick {
            if t.late_by > self.ticker.interval() {
                log::debug!("tick {} ran {:?} late", t.index, t.late_by);
            }
        }
        tick
    }

    /// Re-arms after a tick frame while running. Returns the pending deadline
    /// the runtime should wake up for.
    pub fn end_frame(&mut self, now: Instant) -> Option<Instant> {
        if std::mem::take(&mut self.ticked) && self.running {
            self.ticker.rearm(now);
            log::trace!("next tick in {:?}", self.ticker.interval());
        }
        self.ticker.deadline()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::NaiveDate;

    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    /// Source that advances one second per read.
    struct Counting(Cell<u32>);

    impl TimeSource for Counting {
        fn sample(&self) -> TimeSample {
            let s = self.0.get();
            self.0.set(s + 1);
            let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
            TimeSample::new(date, 10, 0, s % 60, 0).unwrap()
        }
    }

    fn source() -> Counting {
        Counting(Cell::new(0))
    }

    /// One full frame; returns the deadline handed to the runtime.
    fn frame(state: &mut WatchState, now: Instant, src: &Counting) -> Option<Instant> {
        state.begin_frame(now, src);
        state.end_frame(now)
    }

    // ── ticking ──

    #[test]
    fn new_watch_ticks_immediately_then_every_interval() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);

        assert!(w.begin_frame(t0, &src).is_some());
        assert_eq!(w.end_frame(t0), Some(t0 + MS_50));

        assert!(w.begin_frame(t0 + MS_50, &src).is_some());
        assert_eq!(w.sample().unwrap().second(), 1);
    }

    #[test]
    fn repaint_between_ticks_keeps_sample_and_deadline() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);
        frame(&mut w, t0, &src);

        let mid = t0 + Duration::from_millis(20);
        assert!(w.begin_frame(mid, &src).is_none());
        assert_eq!(w.sample().unwrap().second(), 0);
        assert_eq!(w.end_frame(mid), Some(t0 + MS_50));
    }

    // ── stop ──

    #[test]
    fn stop_halts_scheduling_and_keeps_last_sample() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);
        frame(&mut w, t0, &src);

        assert!(w.stop());
        assert_eq!(w.deadline(), None);

        // Exposure repaint long after: no tick, same sample, nothing scheduled.
        let later = t0 + MS_50 * 10;
        assert!(w.begin_frame(later, &src).is_none());
        assert_eq!(w.end_frame(later), None);
        assert_eq!(w.sample().unwrap().second(), 0);
    }

    #[test]
    fn stop_during_tick_frame_does_not_rearm() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);

        assert!(w.begin_frame(t0, &src).is_some());
        w.stop();
        assert_eq!(w.end_frame(t0), None);
    }

    #[test]
    fn stopping_twice_is_a_no_op() {
        let mut w = WatchState::new(MS_50, Instant::now());
        assert!(w.stop());
        assert!(!w.stop());
    }

    // ── start ──

    #[test]
    fn start_while_running_adds_no_second_chain() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);
        frame(&mut w, t0, &src);

        let mid = t0 + Duration::from_millis(10);
        assert!(!w.start(mid));
        assert_eq!(w.deadline(), Some(t0 + MS_50));
    }

    #[test]
    fn start_after_stop_ticks_at_once() {
        let t0 = Instant::now();
        let src = source();
        let mut w = WatchState::new(MS_50, t0);
        frame(&mut w, t0, &src);
        w.stop();

        let t1 = t0 + Duration::from_secs(3);
        assert!(w.start(t1));
        assert_eq!(w.deadline(), Some(t1));
        assert!(w.begin_frame(t1, &src).is_some());
        assert_eq!(w.end_frame(t1), Some(t1 + MS_50));
    }

    #[test]
    fn toggle_flips_running() {
        let now = Instant::now();
        let mut w = WatchState::new(MS_50, now);
        w.toggle(now);
        assert!(!w.is_running());
        w.toggle(now);
        assert!(w.is_running());
    }
}
