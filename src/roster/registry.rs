use std::collections::BTreeSet;

use crate::{
    foundation::error::{ChoreoError, ChoreoResult},
    roster::{
        dancer::{Dancer, DancerId, DancerPatch},
        naming::{disambiguate, initials_for},
        palette::palette_entry,
    },
};

/// The dancers in a show, in the order they joined.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Roster {
    dancers: Vec<Dancer>,
    // every id ever handed out, including removed dancers
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    issued: BTreeSet<DancerId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dancers(&self) -> &[Dancer] {
        &self.dancers
    }

    pub fn len(&self) -> usize {
        self.dancers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dancers.is_empty()
    }

    pub fn is_full(&self, cap: usize) -> bool {
        self.dancers.len() >= cap
    }

    pub fn get(&self, id: &str) -> Option<&Dancer> {
        self.dancers.iter().find(|d| d.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DancerId> {
        self.dancers.iter().map(|d| &d.id)
    }

    /// Adds a dancer whose id and initials derive from `name`.
    pub fn add(&mut self, name: &str, cap: usize) -> ChoreoResult<Dancer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChoreoError::EmptyName);
        }
        if self.is_full(cap) {
            return Err(ChoreoError::RosterFull { cap });
        }

        let initials = initials_for(name);
        let id = DancerId(disambiguate(&initials, |candidate| {
            self.issued.contains(candidate) || self.contains(candidate)
        }));
        let dancer = Dancer {
            id,
            name: name.to_string(),
            initials,
            colors: palette_entry(self.dancers.len()),
        };

        self.issued.insert(dancer.id.clone());
        self.dancers.push(dancer.clone());
        tracing::debug!(id = %dancer.id, name = %dancer.name, "dancer added");
        Ok(dancer)
    }

    /// Adds a dancer with an explicit identity, as used for a show's starting roster.
    pub fn insert(&mut self, dancer: Dancer, cap: usize) -> ChoreoResult<()> {
        if dancer.name.trim().is_empty() {
            return Err(ChoreoError::EmptyName);
        }
        if self.is_full(cap) {
            return Err(ChoreoError::RosterFull { cap });
        }
        if self.contains(dancer.id.as_str()) {
            return Err(ChoreoError::validation(format!(
                "duplicate dancer id '{}'",
                dancer.id
            )));
        }
        self.issued.insert(dancer.id.clone());
        self.dancers.push(dancer);
        Ok(())
    }

    pub fn update(&mut self, id: &str, patch: DancerPatch) {
        match self.dancers.iter_mut().find(|d| d.id.as_str() == id) {
            Some(dancer) => dancer.apply(patch),
            None => tracing::trace!(id, "update for unknown dancer ignored"),
        }
    }

    /// Removes a dancer, returning it if it was on the roster.
    pub fn remove(&mut self, id: &str) -> Option<Dancer> {
        let idx = self.dancers.iter().position(|d| d.id.as_str() == id)?;
        let dancer = self.dancers.remove(idx);
        tracing::debug!(id, "dancer removed");
        Some(dancer)
    }

    /// Re-establishes the issued set after deserializing an older document.
    pub(crate) fn reconcile_issued(&mut self) {
        let current: Vec<DancerId> = self.dancers.iter().map(|d| d.id.clone()).collect();
        self.issued.extend(current);
    }

    pub(crate) fn validate(&self) -> ChoreoResult<()> {
        let mut seen = BTreeSet::new();
        for dancer in &self.dancers {
            if !seen.insert(dancer.id.as_str()) {
                return Err(ChoreoError::validation(format!(
                    "duplicate dancer id '{}'",
                    dancer.id
                )));
            }
            if dancer.name.trim().is_empty() {
                return Err(ChoreoError::validation(format!(
                    "dancer '{}' has an empty name",
                    dancer.id
                )));
            }
            let n = dancer.initials.chars().count();
            if !(1..=3).contains(&n) {
                return Err(ChoreoError::validation(format!(
                    "dancer '{}' initials must be 1-3 characters",
                    dancer.id
                )));
            }
        }
        Ok(())
    }
}
