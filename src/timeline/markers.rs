use crate::{
    formation::{
        model::{Formation, FormationId},
        store::SortedFormations,
    },
    timeline::resolve::Resolved,
};

/// One keyframe dot on the timeline scrubber.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineMarker {
    pub index: usize,
    pub formation_id: FormationId,
    pub label: String, // "F1", "F2", ...
    /// Position along the scrubber in `[0, 1]`.
    pub fraction: f64,
    pub selected: bool,
}

pub fn timeline_markers(
    sorted: SortedFormations<'_>,
    total_duration: f64,
    selected: Option<usize>,
) -> Vec<TimelineMarker> {
    sorted
        .iter()
        .enumerate()
        .map(|(index, f)| TimelineMarker {
            index,
            formation_id: f.id,
            label: format!("F{}", index + 1),
            fraction: if total_duration > 0.0 {
                (f.time / total_duration).clamp(0.0, 1.0)
            } else {
                0.0
            },
            selected: selected == Some(index),
        })
        .collect()
}

/// `m:ss` with both parts floored, e.g. `75.9` -> `"1:15"`.
pub fn format_clock(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}

/// The keyframe selected in the editor sidebar. Follows the playhead, and can be
/// stepped to the previous or next formation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormationCursor {
    index: usize,
}

impl FormationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn follow(&mut self, resolved: &Resolved<'_>) {
        self.index = resolved.current_index;
    }

    /// Pulls the index back inside `[0, len)` after formations were removed.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.index + 1 < len
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        if !self.has_next(len) {
            return false;
        }
        self.index += 1;
        true
    }

    /// The selected formation, falling back to the first when the index is stale.
    pub fn selected<'a>(&self, sorted: SortedFormations<'a>) -> Option<&'a Formation> {
        sorted.get(self.index).or_else(|| sorted.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::config::StageConfig, formation::store::FormationStore,
        roster::dancer::DancerId, timeline::resolve::resolve,
    };

    fn store(times: &[f64]) -> FormationStore {
        let cfg = StageConfig::default();
        let roster = [DancerId::from("KV")];
        let mut store = FormationStore::new();
        for &t in times {
            store.add(Some(t), &roster, &cfg).unwrap();
        }
        store
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(8.0), "0:08");
        assert_eq!(format_clock(75.9), "1:15");
        assert_eq!(format_clock(180.0), "3:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn markers_are_labelled_in_time_order() {
        let s = store(&[90.0, 0.0, 180.0]);
        let markers = timeline_markers(s.sorted(), 180.0, Some(1));
        let labels: Vec<&str> = markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["F1", "F2", "F3"]);
        assert_eq!(markers[1].fraction, 0.5);
        assert_eq!(markers[2].fraction, 1.0);
        assert!(markers[1].selected);
        assert!(!markers[0].selected);
    }

    #[test]
    fn cursor_steps_within_bounds() {
        let s = store(&[0.0, 60.0]);
        let mut cursor = FormationCursor::new();
        assert!(!cursor.previous());
        assert!(cursor.next(s.len()));
        assert!(!cursor.next(s.len()));
        assert_eq!(cursor.selected(s.sorted()).unwrap().time, 60.0);

        cursor.follow(&resolve(s.sorted(), 10.0));
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn cursor_clamps_after_removal() {
        let mut s = store(&[0.0, 60.0, 120.0]);
        let mut cursor = FormationCursor::new();
        cursor.follow(&resolve(s.sorted(), 150.0));
        assert_eq!(cursor.index(), 2);

        let last = s.sorted().get(2).unwrap().id;
        s.remove(last);
        assert_eq!(cursor.selected(s.sorted()).unwrap().time, 0.0);
        cursor.clamp(s.len());
        assert_eq!(cursor.index(), 1);
    }
}
