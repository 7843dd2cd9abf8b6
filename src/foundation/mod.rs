//! Shared primitives: geometry, colors, stage configuration and the error type.

/// Stage and playback settings.
pub mod config;
/// Positions, interpolation and colors.
pub mod core;
/// Error type returned by mutating operations.
pub mod error;
