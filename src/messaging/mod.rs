//! Dancer-to-choreo-head messages.

/// The message inbox.
pub mod log;
