use std::time::{Duration, Instant};

use crate::{
    foundation::config::StageConfig, formation::store::SortedFormations,
    playback::ticks::TickSource,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Playhead that advances by a fixed step on every tick while playing.
///
/// The tick source is started on `play` and stopped on `pause`, on reaching the end of
/// the timeline, and when the clock is dropped. At most one source is live per clock.
#[derive(Debug)]
pub struct PlaybackClock<S: TickSource> {
    state: PlaybackState,
    time: f64,
    total_duration: f64,
    step: f64,
    period: Duration,
    source: S,
}

impl<S: TickSource> PlaybackClock<S> {
    pub fn new(config: &StageConfig, source: S) -> Self {
        Self {
            state: PlaybackState::Stopped,
            time: 0.0,
            total_duration: config.total_duration,
            step: config.tick_step,
            period: config.tick_interval(),
            source,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.time
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Access for feeding a source the clock owns, e.g. [`ManualTicks::fire`].
    ///
    /// [`ManualTicks::fire`]: crate::playback::ticks::ManualTicks::fire
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.source.start(self.period);
        self.state = PlaybackState::Playing;
        tracing::debug!(time = self.time, "playback started");
    }

    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.source.stop();
        self.state = PlaybackState::Stopped;
        tracing::debug!(time = self.time, "playback paused");
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Moves the playhead without touching the play state. Clamped to the timeline.
    pub fn seek(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        self.time = time.clamp(0.0, self.total_duration);
        tracing::debug!(time = self.time, "seeked");
    }

    /// Jumps to the formation at chronological `index`. Returns whether it exists.
    pub fn seek_to_formation(&mut self, sorted: SortedFormations<'_>, index: usize) -> bool {
        let Some(formation) = sorted.get(index) else {
            return false;
        };
        self.seek(formation.time);
        true
    }

    /// Advances one step. Reaching the end clamps the playhead there and stops.
    pub fn tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        let next = self.time + self.step;
        if next >= self.total_duration {
            self.time = self.total_duration;
            self.source.stop();
            self.state = PlaybackState::Stopped;
            tracing::debug!(time = self.time, "playback reached end");
        } else {
            self.time = next;
        }
    }

    /// Applies every tick the source reports as due by `now`. Returns how many applied.
    pub fn drive(&mut self, now: Instant) -> u32 {
        let due = self.source.due(now);
        let mut applied = 0;
        while applied < due && self.is_playing() {
            self.tick();
            applied += 1;
        }
        applied
    }
}

impl<S: TickSource> Drop for PlaybackClock<S> {
    fn drop(&mut self) {
        if self.source.is_running() {
            self.source.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::ticks::ManualTicks;

    fn clock(ticks: &mut ManualTicks) -> PlaybackClock<&mut ManualTicks> {
        PlaybackClock::new(&StageConfig::default(), ticks)
    }

    #[test]
    fn play_starts_a_single_source() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.play();
        c.play();
        assert!(c.is_playing());
        assert_eq!(c.source().starts(), 1);
    }

    #[test]
    fn ticks_advance_while_playing() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.play();
        for _ in 0..10 {
            c.tick();
        }
        assert!((c.current_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_are_ignored_while_stopped() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.tick();
        assert_eq!(c.current_time(), 0.0);
    }

    #[test]
    fn reaching_the_end_clamps_and_stops() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.seek(179.95);
        c.play();
        c.tick();
        assert_eq!(c.current_time(), 180.0);
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert!(!c.source().is_running());
    }

    #[test]
    fn pause_stops_source_and_discards_pending() {
        let mut ticks = ManualTicks::new();
        {
            let mut c = clock(&mut ticks);
            c.play();
            c.pause();
            assert!(!c.source().is_running());
            assert_eq!(c.drive(Instant::now()), 0);
            assert_eq!(c.current_time(), 0.0);
        }
        assert_eq!(ticks.stops(), 1);
    }

    #[test]
    fn seek_keeps_play_state_and_clamps() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.play();
        c.seek(500.0);
        assert!(c.is_playing());
        assert_eq!(c.current_time(), 180.0);
        c.seek(-4.0);
        assert_eq!(c.current_time(), 0.0);
        c.seek(f64::NAN);
        assert_eq!(c.current_time(), 0.0);
    }

    #[test]
    fn dropping_a_playing_clock_stops_its_source() {
        let mut ticks = ManualTicks::new();
        {
            let mut c = clock(&mut ticks);
            c.play();
        }
        assert!(!ticks.is_running());
        assert_eq!(ticks.stops(), 1);
    }

    #[test]
    fn toggle_flips_state() {
        let mut ticks = ManualTicks::new();
        let mut c = clock(&mut ticks);
        c.toggle();
        assert!(c.is_playing());
        c.toggle();
        assert!(!c.is_playing());
        assert_eq!((c.source().starts(), c.source().stops()), (1, 1));
    }
}
