use std::{collections::BTreeMap, fmt};

use crate::{foundation::core::Position, roster::dancer::DancerId};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FormationId(pub u32);

impl fmt::Display for FormationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every placed dancer's stage position at one moment of the piece.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Formation {
    pub id: FormationId,
    pub time: f64, // seconds, >= 0
    pub positions: BTreeMap<DancerId, Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Formation {
    pub fn position_of(&self, dancer: &str) -> Option<Position> {
        self.positions.get(dancer).copied()
    }
}

/// Fields to merge into an existing formation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormationPatch {
    pub time: Option<f64>,
    pub notes: Option<String>,
}

impl FormationPatch {
    pub fn time(time: f64) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }
}
