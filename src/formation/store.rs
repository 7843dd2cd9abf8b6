use std::collections::BTreeSet;

use crate::{
    foundation::{
        config::StageConfig,
        core::{Position, check_time, floor_second},
        error::{ChoreoError, ChoreoResult},
    },
    formation::model::{Formation, FormationId, FormationPatch},
    roster::dancer::DancerId,
};

/// Formations ordered by ascending time. Only [`FormationStore::sorted`] hands these out,
/// so anything accepting one can rely on the ordering.
#[derive(Clone, Copy, Debug)]
pub struct SortedFormations<'a>(&'a [Formation]);

impl<'a> SortedFormations<'a> {
    pub(crate) fn from_sorted(formations: &'a [Formation]) -> Self {
        Self(formations)
    }

    pub fn as_slice(&self) -> &'a [Formation] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Formation> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Formation> {
        self.0.iter()
    }
}

/// Owns a show's formations and keeps them sorted by time after every mutation.
///
/// No two formations share the same whole second: `1.2` and `1.8` clash, `1.2` and
/// `2.1` do not.
#[derive(Clone, Debug, Default)]
pub struct FormationStore {
    formations: Vec<Formation>, // sorted by time
}

impl FormationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted(&self) -> SortedFormations<'_> {
        SortedFormations(&self.formations)
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    pub fn get(&self, id: FormationId) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == id)
    }

    /// Chronological index of a formation.
    pub fn index_of(&self, id: FormationId) -> Option<usize> {
        self.formations.iter().position(|f| f.id == id)
    }

    /// The id the next added formation will receive.
    pub fn next_id(&self) -> FormationId {
        let max = self.formations.iter().map(|f| f.id.0).max().unwrap_or(0);
        FormationId(max + 1)
    }

    fn occupied(&self, second: u64, except: Option<FormationId>) -> bool {
        self.formations
            .iter()
            .any(|f| Some(f.id) != except && floor_second(f.time) == second)
    }

    /// Adds a formation at `time`, or at `len * spacing` when no time is given.
    ///
    /// The new formation starts from a copy of the chronologically last formation's
    /// positions. In an empty store every dancer in `roster` starts at `center`.
    pub fn add<'r>(
        &mut self,
        time: Option<f64>,
        roster: impl IntoIterator<Item = &'r DancerId>,
        config: &StageConfig,
    ) -> ChoreoResult<FormationId> {
        let time = check_time(
            time.unwrap_or(self.formations.len() as f64 * config.formation_spacing),
        )?;
        let second = floor_second(time);
        if self.occupied(second, None) {
            return Err(ChoreoError::TimeConflict { second });
        }

        let positions = match self.formations.last() {
            Some(last) => last.positions.clone(),
            None => {
                let center = config.center();
                roster.into_iter().map(|id| (id.clone(), center)).collect()
            }
        };

        let id = self.next_id();
        self.formations.push(Formation {
            id,
            time,
            positions,
            notes: None,
        });
        self.sort();
        tracing::debug!(%id, time, "formation added");
        Ok(id)
    }

    /// Inserts a fully specified formation, as used when building a show.
    pub fn insert(&mut self, formation: Formation) -> ChoreoResult<()> {
        check_time(formation.time)?;
        if self.get(formation.id).is_some() {
            return Err(ChoreoError::validation(format!(
                "duplicate formation id {}",
                formation.id
            )));
        }
        let second = floor_second(formation.time);
        if self.occupied(second, None) {
            return Err(ChoreoError::TimeConflict { second });
        }
        self.formations.push(formation);
        self.sort();
        Ok(())
    }

    pub fn remove(&mut self, id: FormationId) -> Option<Formation> {
        let idx = self.index_of(id)?;
        let removed = self.formations.remove(idx);
        tracing::debug!(%id, "formation removed");
        Some(removed)
    }

    /// Merges `patch` into a formation. A new time that lands on another formation's
    /// second is rejected and nothing changes.
    pub fn update(&mut self, id: FormationId, patch: FormationPatch) -> ChoreoResult<()> {
        let Some(idx) = self.index_of(id) else {
            tracing::trace!(%id, "update for unknown formation ignored");
            return Ok(());
        };

        if let Some(time) = patch.time {
            let time = check_time(time)?;
            let second = floor_second(time);
            if self.occupied(second, Some(id)) {
                return Err(ChoreoError::TimeConflict { second });
            }
        }

        let formation = &mut self.formations[idx];
        if let Some(notes) = patch.notes {
            formation.notes = (!notes.trim().is_empty()).then_some(notes);
        }
        if let Some(time) = patch.time {
            formation.time = time;
            self.sort();
        }
        tracing::debug!(%id, "formation updated");
        Ok(())
    }

    /// Places a dancer in one formation. Returns whether the formation exists.
    ///
    /// Positions off the stage grid (including NaN) are rejected and nothing changes.
    pub fn set_position(
        &mut self,
        id: FormationId,
        dancer: &DancerId,
        position: Position,
        config: &StageConfig,
    ) -> ChoreoResult<bool> {
        let position = config.check_position(position)?;
        let Some(formation) = self.formations.iter_mut().find(|f| f.id == id) else {
            tracing::trace!(%id, "position update for unknown formation ignored");
            return Ok(false);
        };
        formation.positions.insert(dancer.clone(), position);
        Ok(true)
    }

    /// Gives `dancer` a position in every formation.
    pub fn seed_dancer(&mut self, dancer: &DancerId, position: Position) {
        for formation in &mut self.formations {
            formation.positions.insert(dancer.clone(), position);
        }
    }

    /// Drops `dancer` from every formation.
    pub fn purge_dancer(&mut self, dancer: &str) {
        for formation in &mut self.formations {
            formation.positions.remove(dancer);
        }
    }

    fn sort(&mut self) {
        self.formations.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    pub(crate) fn validate(&self, config: &StageConfig) -> ChoreoResult<()> {
        let mut ids = BTreeSet::new();
        let mut seconds = BTreeSet::new();
        for f in &self.formations {
            check_time(f.time)?;
            if !ids.insert(f.id) {
                return Err(ChoreoError::validation(format!(
                    "duplicate formation id {}",
                    f.id
                )));
            }
            if !seconds.insert(floor_second(f.time)) {
                return Err(ChoreoError::TimeConflict {
                    second: floor_second(f.time),
                });
            }
            if let Some((dancer, pos)) = f.positions.iter().find(|(_, p)| !config.contains(**p)) {
                return Err(ChoreoError::validation(format!(
                    "formation {} places '{dancer}' at ({}, {}), outside the {}x{} grid",
                    f.id, pos.x, pos.y, config.grid_size, config.grid_size
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<Formation>> for FormationStore {
    fn from(formations: Vec<Formation>) -> Self {
        let mut store = Self { formations };
        store.sort();
        store
    }
}

impl From<FormationStore> for Vec<Formation> {
    fn from(store: FormationStore) -> Self {
        store.formations
    }
}

impl serde::Serialize for FormationStore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.formations.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for FormationStore {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Formation>::deserialize(deserializer).map(Self::from)
    }
}
