use std::time::{Duration, Instant};

/// A tick that fired.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Monotonic tick counter, starting at 0.
    pub index: u64,
    /// How far past the deadline the tick was observed.
    pub late_by: Duration,
}

/// One-shot deadline with a fixed re-arm interval.
///
/// A fired tick disarms the ticker. The caller re-arms from inside its tick
/// handler with [`rearm`](Self::rearm), so at most one deadline is ever
/// pending and ticks cannot overlap.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
    fired: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, deadline: None, fired: 0 }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of ticks fired so far.
    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Schedules a tick for `now`; the next `poll` at or after `now` fires.
    pub fn arm_now(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// Schedules the next tick one interval after `now`.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Fires if armed and `now` has reached the deadline. Firing disarms.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        let tick = Tick { index: self.fired, late_by: now.saturating_duration_since(deadline) };
        self.fired += 1;
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn unarmed_ticker_never_fires() {
        let mut t = Ticker::new(MS_50);
        assert!(t.poll(Instant::now()).is_none());
        assert_eq!(t.fired(), 0);
    }

    #[test]
    fn arm_now_fires_on_next_poll() {
        let mut t = Ticker::new(MS_50);
        let now = Instant::now();
        t.arm_now(now);
        let tick = t.poll(now).unwrap();
        assert_eq!(tick.index, 0);
        assert_eq!(tick.late_by, Duration::ZERO);
    }

    #[test]
    fn fired_tick_disarms_until_rearmed() {
        let mut t = Ticker::new(MS_50);
        let now = Instant::now();
        t.arm_now(now);
        assert!(t.poll(now).is_some());
        assert!(!t.is_armed());
        assert!(t.poll(now + MS_50 * 10).is_none());
    }

    #[test]
    fn rearm_waits_one_interval() {
        let mut t = Ticker::new(MS_50);
        let now = Instant::now();
        t.rearm(now);
        assert_eq!(t.deadline(), Some(now + MS_50));
        assert!(t.poll(now + Duration::from_millis(49)).is_none());

        let tick = t.poll(now + Duration::from_millis(60)).unwrap();
        assert_eq!(tick.late_by, Duration::from_millis(10));
    }

    #[test]
    fn rearming_replaces_the_pending_deadline() {
        let mut t = Ticker::new(MS_50);
        let now = Instant::now();
        t.rearm(now);
        t.arm_now(now);
        assert_eq!(t.deadline(), Some(now));
        assert!(t.poll(now).is_some());
        assert!(t.poll(now + MS_50).is_none());
    }

    #[test]
    fn disarm_cancels() {
        let mut t = Ticker::new(MS_50);
        let now = Instant::now();
        t.arm_now(now);
        t.disarm();
        assert!(t.poll(now + MS_50).is_none());
    }
}
