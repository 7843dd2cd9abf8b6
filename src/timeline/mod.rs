//! Timeline queries: which formations surround a point in time, where dancers stand
//! there, and scrubber presentation helpers.

/// Scrubber markers, clock formatting and keyframe selection.
pub mod markers;
/// Formation lookup and position interpolation.
pub mod resolve;
