//! Dancer roster: identities, display attributes and color assignment.

/// Dancer identity and display attributes.
pub mod dancer;
/// Name-derived ids and initials.
pub mod naming;
/// Fixed marker color palette.
pub mod palette;
/// The roster container.
pub mod registry;
