//! Choreo is a formation and timeline engine for planning dance choreography.
//!
//! A [`Show`] holds a roster of dancers and a set of formations: snapshots of every
//! dancer's position on a square stage grid at a given second. Scrubbing the timeline
//! resolves the formations around the playhead and blends each dancer linearly from
//! one to the next.
//!
//! # Overview
//!
//! 1. **Edit**: roster, formation and message operations on [`Show`]
//! 2. **Resolve**: `SortedFormations + time -> Resolved` (current and next formation)
//! 3. **Evaluate**: `Show + time -> StageFrame` (per-dancer positions for drawing)
//! 4. **Play**: [`PlaybackClock`] advances the playhead from an injected [`TickSource`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure queries**: resolving and evaluating never mutate and are deterministic.
//! - **Sorted storage**: formations are kept in time order by every mutation; no caller
//!   sorts on its own.
#![forbid(unsafe_code)]

mod foundation;
mod formation;
mod messaging;
mod playback;
mod roster;
mod show;
mod timeline;

pub use foundation::config::StageConfig;
pub use foundation::core::{Lerp, Point, Position, Rgb8, floor_second};
pub use foundation::error::{ChoreoError, ChoreoResult};
pub use formation::model::{Formation, FormationId, FormationPatch};
pub use formation::store::{FormationStore, SortedFormations};
pub use messaging::log::{Message, MessageLog};
pub use playback::clock::{PlaybackClock, PlaybackState};
pub use playback::ticks::{IntervalTicks, ManualTicks, TickSource};
pub use roster::dancer::{Dancer, DancerColors, DancerId, DancerPatch};
pub use roster::naming::initials_for;
pub use roster::palette::{PALETTE, palette_entry};
pub use roster::registry::Roster;
pub use show::dsl::{FormationBuilder, ShowBuilder};
pub use show::eval::{DancerNode, Evaluator, StageFrame};
pub use show::model::{DancerPath, Show};
pub use timeline::markers::{FormationCursor, TimelineMarker, format_clock, timeline_markers};
pub use timeline::resolve::{Resolved, interpolate, resolve, resolve_slice};
