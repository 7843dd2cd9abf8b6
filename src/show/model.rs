use crate::{
    foundation::{
        config::StageConfig,
        core::Position,
        error::{ChoreoError, ChoreoResult},
    },
    formation::{
        model::{Formation, FormationId, FormationPatch},
        store::{FormationStore, SortedFormations},
    },
    messaging::log::{Message, MessageLog},
    roster::{
        dancer::{Dancer, DancerId, DancerPatch},
        registry::Roster,
    },
    timeline::{
        markers::{TimelineMarker, timeline_markers},
        resolve::{Resolved, interpolate, resolve},
    },
};

/// Everything a choreography session works on: stage settings, the roster, the
/// formations and the message inbox.
///
/// Views receive a `&Show` (or `&mut Show` for editing) from whoever owns it; there is no
/// global instance.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ShowDocument")]
pub struct Show {
    config: StageConfig,
    #[serde(flatten)]
    roster: Roster,
    formations: FormationStore,
    messages: MessageLog,
}

#[derive(serde::Deserialize)]
struct ShowDocument {
    #[serde(default)]
    config: StageConfig,
    #[serde(flatten)]
    roster: Roster,
    #[serde(default)]
    formations: FormationStore,
    #[serde(default)]
    messages: MessageLog,
}

impl TryFrom<ShowDocument> for Show {
    type Error = ChoreoError;

    fn try_from(doc: ShowDocument) -> Result<Self, Self::Error> {
        let mut show = Show {
            config: doc.config,
            roster: doc.roster,
            formations: doc.formations,
            messages: doc.messages,
        };
        show.roster.reconcile_issued();
        show.validate()?;
        Ok(show)
    }
}

/// A dancer's own path at one moment: where they stand and where they are headed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DancerPath {
    pub from: Position,
    pub to: Option<Position>,
}

impl Show {
    pub fn new(config: StageConfig) -> ChoreoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            roster: Roster::new(),
            formations: FormationStore::new(),
            messages: MessageLog::new(),
        })
    }

    pub fn from_json(json: &str) -> ChoreoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> ChoreoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Changes the timeline length, e.g. from a command-line override.
    pub fn set_total_duration(&mut self, seconds: f64) -> ChoreoResult<()> {
        let config = StageConfig {
            total_duration: seconds,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub(crate) fn store_mut(&mut self) -> &mut FormationStore {
        &mut self.formations
    }

    pub fn dancers(&self) -> &[Dancer] {
        self.roster.dancers()
    }

    /// Formations in time order.
    pub fn formations(&self) -> SortedFormations<'_> {
        self.formations.sorted()
    }

    pub fn formation(&self, id: FormationId) -> Option<&Formation> {
        self.formations.get(id)
    }

    pub fn formation_at_index(&self, index: usize) -> Option<&Formation> {
        self.formations.sorted().get(index)
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.messages()
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    pub fn add_formation(&mut self, time: Option<f64>) -> ChoreoResult<FormationId> {
        self.formations.add(time, self.roster.ids(), &self.config)
    }

    pub fn remove_formation(&mut self, id: FormationId) {
        self.formations.remove(id);
    }

    pub fn update_formation(
        &mut self,
        id: FormationId,
        patch: FormationPatch,
    ) -> ChoreoResult<()> {
        self.formations.update(id, patch)
    }

    /// Places a rostered dancer in one formation. Unknown formations or dancers are ignored;
    /// a position off the stage grid is an `OffStage` error and nothing changes.
    pub fn update_dancer_position(
        &mut self,
        formation: FormationId,
        dancer: &str,
        position: Position,
    ) -> ChoreoResult<()> {
        let position = self.config.check_position(position)?;
        let Some(id) = self.roster.get(dancer).map(|d| d.id.clone()) else {
            tracing::trace!(dancer, "position update for unknown dancer ignored");
            return Ok(());
        };
        self.formations
            .set_position(formation, &id, position, &self.config)?;
        Ok(())
    }

    /// Adds a dancer by name and places them at stage center in every formation.
    pub fn add_dancer(&mut self, name: &str) -> ChoreoResult<Dancer> {
        let dancer = self.roster.add(name, self.config.max_dancers)?;
        self.formations.seed_dancer(&dancer.id, self.config.center());
        Ok(dancer)
    }

    pub fn update_dancer(&mut self, id: &str, patch: DancerPatch) {
        self.roster.update(id, patch);
    }

    /// Removes a dancer from the roster and from every formation.
    pub fn remove_dancer(&mut self, id: &str) {
        if let Some(dancer) = self.roster.remove(id) {
            self.formations.purge_dancer(dancer.id.as_str());
        }
    }

    pub fn add_message(&mut self, dancer: &str, text: &str) -> ChoreoResult<Message> {
        self.messages.add(DancerId::from(dancer), text)
    }

    pub fn mark_message_as_read(&mut self, id: i64) {
        self.messages.mark_read(id);
    }

    pub fn delete_message(&mut self, id: i64) {
        self.messages.delete(id);
    }

    pub fn resolve_at_time(&self, time: f64) -> Resolved<'_> {
        resolve(self.formations.sorted(), time)
    }

    pub fn interpolated_position(&self, dancer: &str, time: f64) -> Option<Position> {
        let resolved = self.resolve_at_time(time);
        interpolate(dancer, resolved.current?, resolved.next, time)
    }

    pub fn dancer_path(&self, dancer: &str, time: f64) -> Option<DancerPath> {
        let resolved = self.resolve_at_time(time);
        let from = interpolate(dancer, resolved.current?, resolved.next, time)?;
        Some(DancerPath {
            from,
            to: resolved.next.and_then(|n| n.position_of(dancer)),
        })
    }

    pub fn markers(&self, selected: Option<usize>) -> Vec<TimelineMarker> {
        timeline_markers(
            self.formations.sorted(),
            self.config.total_duration,
            selected,
        )
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        self.config.validate()?;
        self.roster.validate()?;
        if self.roster.len() > self.config.max_dancers {
            return Err(ChoreoError::RosterFull {
                cap: self.config.max_dancers,
            });
        }
        self.formations.validate(&self.config)
    }
}
