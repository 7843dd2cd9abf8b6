use crate::{
    foundation::core::Position,
    formation::model::FormationId,
    roster::dancer::{DancerColors, DancerId},
    show::model::Show,
    timeline::resolve::interpolate,
};

/// Everything needed to draw the stage at one point on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageFrame {
    pub time: f64,
    pub current_index: usize,
    pub current_formation: Option<FormationId>,
    pub next_formation: Option<FormationId>,
    pub dancers: Vec<DancerNode>, // roster order
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DancerNode {
    pub dancer_id: DancerId,
    pub initials: String,
    #[serde(flatten)]
    pub colors: DancerColors,
    pub position: Position,
    /// Where the dancer stands in the next formation (ghost marker).
    pub next_position: Option<Position>,
}

pub struct Evaluator;

impl Evaluator {
    /// Dancers with no position in the current formation get no node.
    #[tracing::instrument(skip(show))]
    pub fn eval_at(show: &Show, time: f64) -> StageFrame {
        let resolved = show.resolve_at_time(time);

        let dancers = match resolved.current {
            Some(current) => show
                .dancers()
                .iter()
                .filter_map(|d| {
                    let position = interpolate(d.id.as_str(), current, resolved.next, time)?;
                    Some(DancerNode {
                        dancer_id: d.id.clone(),
                        initials: d.initials.clone(),
                        colors: d.colors,
                        position,
                        next_position: resolved
                            .next
                            .and_then(|n| n.position_of(d.id.as_str())),
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        StageFrame {
            time,
            current_index: resolved.current_index,
            current_formation: resolved.current.map(|f| f.id),
            next_formation: resolved.next.map(|f| f.id),
            dancers,
        }
    }
}
