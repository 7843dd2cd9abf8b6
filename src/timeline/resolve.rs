use crate::{
    foundation::core::{Lerp, Position},
    formation::{model::Formation, store::SortedFormations},
};

/// The formations surrounding a point on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved<'a> {
    /// Latest formation at or before the query time; the first formation when the
    /// query precedes all of them.
    pub current: Option<&'a Formation>,
    /// Formation right after `current` in time order.
    pub next: Option<&'a Formation>,
    pub current_index: usize,
}

impl Resolved<'_> {
    pub const EMPTY: Self = Self {
        current: None,
        next: None,
        current_index: 0,
    };
}

pub fn resolve(sorted: SortedFormations<'_>, time: f64) -> Resolved<'_> {
    let formations = sorted.as_slice();
    if formations.is_empty() {
        return Resolved::EMPTY;
    }

    let eligible = formations.partition_point(|f| f.time <= time);
    let current_index = eligible.saturating_sub(1);
    Resolved {
        current: formations.get(current_index),
        next: formations.get(current_index + 1),
        current_index,
    }
}

/// [`resolve`] for a slice that did not come from a store.
///
/// # Panics
///
/// Panics if `formations` is not sorted by ascending time.
pub fn resolve_slice(formations: &[Formation], time: f64) -> Resolved<'_> {
    assert!(
        formations.windows(2).all(|w| w[0].time <= w[1].time),
        "formations must be sorted by time before resolving"
    );
    resolve(SortedFormations::from_sorted(formations), time)
}

/// Where `dancer` stands at `time`, blending linearly from `current` toward `next`.
///
/// `None` when `current` has no position for the dancer. Without a usable next
/// position (no next formation, dancer absent there, or a next time of zero) the
/// dancer holds `current`'s position.
pub fn interpolate(
    dancer: &str,
    current: &Formation,
    next: Option<&Formation>,
    time: f64,
) -> Option<Position> {
    let from = current.position_of(dancer)?;
    let Some((to, next_time)) = next.and_then(|n| Some((n.position_of(dancer)?, n.time))) else {
        return Some(from);
    };
    if next_time == 0.0 || next_time <= current.time {
        return Some(from);
    }

    if time <= current.time {
        return Some(from);
    }
    if time >= next_time {
        return Some(to);
    }
    let progress = ((time - current.time) / (next_time - current.time)).clamp(0.0, 1.0);
    Some(<Position as Lerp>::lerp(&from, &to, progress))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{formation::model::FormationId, roster::dancer::DancerId};

    fn formation(id: u32, time: f64, kv: Option<(f64, f64)>) -> Formation {
        let mut positions = BTreeMap::new();
        if let Some((x, y)) = kv {
            positions.insert(DancerId::from("KV"), Position::new(x, y));
        }
        Formation {
            id: FormationId(id),
            time,
            positions,
            notes: None,
        }
    }

    fn three() -> Vec<Formation> {
        vec![
            formation(1, 0.0, Some((0.0, 0.0))),
            formation(2, 60.0, Some((10.0, 10.0))),
            formation(3, 120.0, None),
        ]
    }

    #[test]
    fn resolve_empty_is_all_none() {
        let r = resolve_slice(&[], 5.0);
        assert_eq!(r, Resolved::EMPTY);
    }

    #[test]
    fn resolve_picks_latest_eligible() {
        let fs = three();
        let r = resolve_slice(&fs, 60.0);
        assert_eq!(r.current.unwrap().id, FormationId(2));
        assert_eq!(r.next.unwrap().id, FormationId(3));
        assert_eq!(r.current_index, 1);

        let r = resolve_slice(&fs, 59.9);
        assert_eq!(r.current_index, 0);
    }

    #[test]
    fn resolve_after_last_has_no_next() {
        let fs = three();
        let r = resolve_slice(&fs, 500.0);
        assert_eq!(r.current.unwrap().id, FormationId(3));
        assert!(r.next.is_none());
        assert_eq!(r.current_index, 2);
    }

    #[test]
    fn resolve_before_first_defaults_to_first() {
        let fs = vec![formation(1, 10.0, None), formation(2, 20.0, None)];
        let r = resolve_slice(&fs, 3.0);
        assert_eq!(r.current.unwrap().id, FormationId(1));
        assert_eq!(r.next.unwrap().id, FormationId(2));
        assert_eq!(r.current_index, 0);
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn resolve_slice_rejects_unsorted_input() {
        let fs = vec![formation(1, 20.0, None), formation(2, 10.0, None)];
        let _ = resolve_slice(&fs, 0.0);
    }

    #[test]
    fn interpolate_midpoint() {
        let fs = three();
        assert_eq!(
            interpolate("KV", &fs[0], Some(&fs[1]), 30.0),
            Some(Position::new(5.0, 5.0))
        );
    }

    #[test]
    fn interpolate_clamps_at_both_ends() {
        let a = formation(1, 10.0, Some((0.1, 0.2)));
        let b = formation(2, 20.0, Some((0.7, 0.3)));
        assert_eq!(interpolate("KV", &a, Some(&b), 10.0), Some(Position::new(0.1, 0.2)));
        assert_eq!(interpolate("KV", &a, Some(&b), 0.0), Some(Position::new(0.1, 0.2)));
        assert_eq!(interpolate("KV", &a, Some(&b), 20.0), Some(Position::new(0.7, 0.3)));
        assert_eq!(interpolate("KV", &a, Some(&b), 99.0), Some(Position::new(0.7, 0.3)));
    }

    #[test]
    fn interpolate_is_monotonic_between_keys() {
        let fs = three();
        let xs: Vec<f64> = (0..=60)
            .map(|t| interpolate("KV", &fs[0], Some(&fs[1]), f64::from(t)).unwrap().x)
            .collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn interpolate_holds_without_next_position() {
        let fs = three();
        assert_eq!(
            interpolate("KV", &fs[1], Some(&fs[2]), 90.0),
            Some(Position::new(10.0, 10.0))
        );
        assert_eq!(
            interpolate("KV", &fs[1], None, 90.0),
            Some(Position::new(10.0, 10.0))
        );
        assert_eq!(interpolate("KV", &fs[2], None, 130.0), None);
        assert_eq!(interpolate("NI", &fs[0], Some(&fs[1]), 30.0), None);
    }

    #[test]
    fn interpolate_treats_zero_next_time_as_missing() {
        let a = formation(1, 0.0, Some((1.0, 1.0)));
        let b = formation(2, 0.0, Some((9.0, 9.0)));
        assert_eq!(interpolate("KV", &a, Some(&b), 0.0), Some(Position::new(1.0, 1.0)));
    }
}
