//! Playback transport: a play/pause state machine driven by an injected tick source.

/// The playhead state machine.
pub mod clock;
/// Tick sources (manual and wall-clock).
pub mod ticks;
