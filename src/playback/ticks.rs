use std::time::{Duration, Instant};

/// Something that issues playback ticks at a fixed period while started.
///
/// A stopped source reports no ticks; anything that came due before `stop` is
/// discarded.
pub trait TickSource {
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Ticks that came due up to `now` and have not been reported yet.
    fn due(&mut self, now: Instant) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    fn start(&mut self, period: Duration) {
        (**self).start(period);
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn due(&mut self, now: Instant) -> u32 {
        (**self).due(now)
    }
}

/// Ticks fired by hand, for driving a clock without wall time.
#[derive(Clone, Debug, Default)]
pub struct ManualTicks {
    running: bool,
    pending: u32,
    starts: u32,
    stops: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `n` ticks. Ignored while stopped.
    pub fn fire(&mut self, n: u32) {
        if self.running {
            self.pending = self.pending.saturating_add(n);
        }
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn stops(&self) -> u32 {
        self.stops
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self, _period: Duration) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.stops += 1;
        }
        self.running = false;
        self.pending = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn due(&mut self, _now: Instant) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

/// Wall-clock ticks computed from deadlines; the owner polls [`TickSource::due`].
#[derive(Clone, Debug, Default)]
pub struct IntervalTicks {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(&mut self, period: Duration, now: Instant) {
        self.period = period.max(Duration::from_millis(1));
        self.next_due = Some(now + self.period);
    }

    /// When the next tick comes due, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }
}

impl TickSource for IntervalTicks {
    fn start(&mut self, period: Duration) {
        self.start_at(period, Instant::now());
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    fn due(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next_due else {
            return 0;
        };
        if now < next {
            return 0;
        }
        let late = now.duration_since(next).as_nanos() / self.period.as_nanos();
        let n = u32::try_from(late + 1).unwrap_or(u32::MAX);
        self.next_due = Some(next + self.period * n);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_ticks_drop_while_stopped() {
        let mut ticks = ManualTicks::new();
        ticks.fire(3);
        assert_eq!(ticks.due(Instant::now()), 0);

        ticks.start(Duration::from_millis(100));
        ticks.fire(2);
        ticks.stop();
        assert_eq!(ticks.due(Instant::now()), 0);
        assert_eq!((ticks.starts(), ticks.stops()), (1, 1));
    }

    #[test]
    fn interval_ticks_count_elapsed_periods() {
        let t0 = Instant::now();
        let period = Duration::from_millis(100);
        let mut ticks = IntervalTicks::new();
        ticks.start_at(period, t0);

        assert_eq!(ticks.due(t0 + Duration::from_millis(99)), 0);
        assert_eq!(ticks.due(t0 + Duration::from_millis(100)), 1);
        assert_eq!(ticks.due(t0 + Duration::from_millis(450)), 3);
        assert_eq!(ticks.next_deadline(), Some(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn interval_ticks_stop_clears_deadline() {
        let t0 = Instant::now();
        let mut ticks = IntervalTicks::new();
        ticks.start_at(Duration::from_millis(100), t0);
        ticks.stop();
        assert!(!ticks.is_running());
        assert_eq!(ticks.due(t0 + Duration::from_secs(5)), 0);
    }
}
