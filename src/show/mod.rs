//! The show context that ties roster, formations, timeline and messages together.

/// Builders for a show's starting state.
pub mod dsl;
/// Stage snapshots for rendering.
pub mod eval;
/// The [`model::Show`] context and its operations.
pub mod model;
