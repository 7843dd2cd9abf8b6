//! Formations and the time-ordered store that owns them.

/// Formation data types.
pub mod model;
/// Time-ordered formation storage.
pub mod store;
