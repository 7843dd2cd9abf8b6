use std::collections::BTreeMap;

use crate::{
    foundation::{config::StageConfig, core::Position, error::ChoreoResult},
    formation::model::{Formation, FormationId},
    roster::{
        dancer::{Dancer, DancerId},
        palette::palette_entry,
    },
    show::model::Show,
};

/// Assembles a show's starting roster and formations.
pub struct ShowBuilder {
    config: StageConfig,
    dancers: Vec<(String, String)>,
    formations: Vec<FormationBuilder>,
}

impl ShowBuilder {
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            dancers: Vec::new(),
            formations: Vec::new(),
        }
    }

    /// Adds a roster entry with an explicit id, which doubles as its initials.
    /// Colors follow the palette in roster order.
    pub fn dancer(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.dancers.push((id.into(), name.into()));
        self
    }

    pub fn formation(mut self, formation: FormationBuilder) -> Self {
        self.formations.push(formation);
        self
    }

    pub fn build(self) -> ChoreoResult<Show> {
        let mut show = Show::new(self.config)?;
        let cap = show.config().max_dancers;
        for (index, (id, name)) in self.dancers.into_iter().enumerate() {
            let initials = id.chars().take(3).collect::<String>().to_uppercase();
            show.roster_mut().insert(
                Dancer {
                    id: DancerId(id),
                    name,
                    initials,
                    colors: palette_entry(index),
                },
                cap,
            )?;
        }

        let center = show.config().center();
        let roster: Vec<DancerId> = show.roster().ids().cloned().collect();
        for (index, fb) in self.formations.into_iter().enumerate() {
            let id = fb.id.unwrap_or(FormationId(index as u32 + 1));
            let mut positions: BTreeMap<DancerId, Position> = roster
                .iter()
                .map(|dancer| (dancer.clone(), center))
                .collect();
            positions.extend(fb.positions);
            show.store_mut().insert(Formation {
                id,
                time: fb.time,
                positions,
                notes: fb.notes,
            })?;
        }

        show.validate()?;
        Ok(show)
    }
}

/// One formation for [`ShowBuilder`]. Dancers without an explicit position start at
/// stage center.
pub struct FormationBuilder {
    id: Option<FormationId>,
    time: f64,
    positions: BTreeMap<DancerId, Position>,
    notes: Option<String>,
}

impl FormationBuilder {
    pub fn new(time: f64) -> Self {
        Self {
            id: None,
            time,
            positions: BTreeMap::new(),
            notes: None,
        }
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(FormationId(id));
        self
    }

    pub fn place(mut self, dancer: impl Into<String>, x: f64, y: f64) -> Self {
        self.positions
            .insert(DancerId(dancer.into()), Position::new(x, y));
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Show {
    /// The starting state of a fresh session: five dancers at stage center in a single
    /// formation at `0:00`.
    pub fn demo() -> ChoreoResult<Show> {
        ShowBuilder::new(StageConfig::default())
            .dancer("KV", "Kevin")
            .dancer("MP", "Mary")
            .dancer("AT", "Alex")
            .dancer("RS", "Ryan")
            .dancer("NI", "Nina")
            .formation(FormationBuilder::new(0.0))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{foundation::error::ChoreoError, roster::palette::PALETTE};

    #[test]
    fn demo_matches_startup_state() {
        let show = Show::demo().unwrap();
        let ids: Vec<&str> = show.dancers().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["KV", "MP", "AT", "RS", "NI"]);
        assert_eq!(show.dancers()[2].colors, PALETTE[2]);

        let f = show.formation_at_index(0).unwrap();
        assert_eq!(f.id, FormationId(1));
        assert_eq!(f.time, 0.0);
        assert_eq!(f.positions.len(), 5);
        assert!(f.positions.values().all(|p| *p == Position::new(6.0, 6.0)));
    }

    #[test]
    fn builder_places_explicit_positions() {
        let show = ShowBuilder::new(StageConfig::default())
            .dancer("KV", "Kevin")
            .dancer("NI", "Nina")
            .formation(FormationBuilder::new(0.0).place("KV", 0.0, 0.0))
            .formation(
                FormationBuilder::new(60.0)
                    .place("KV", 10.0, 10.0)
                    .notes("chorus"),
            )
            .build()
            .unwrap();

        let late = show.formation_at_index(1).unwrap();
        assert_eq!(late.id, FormationId(2));
        assert_eq!(late.position_of("KV"), Some(Position::new(10.0, 10.0)));
        assert_eq!(late.position_of("NI"), Some(Position::new(6.0, 6.0)));
        assert_eq!(late.notes.as_deref(), Some("chorus"));
    }

    #[test]
    fn builder_rejects_duplicate_dancers_and_clashing_times() {
        let dup = ShowBuilder::new(StageConfig::default())
            .dancer("KV", "Kevin")
            .dancer("KV", "Kyle")
            .build();
        assert!(dup.is_err());

        let clash = ShowBuilder::new(StageConfig::default())
            .formation(FormationBuilder::new(3.1))
            .formation(FormationBuilder::new(3.9))
            .build();
        assert!(matches!(clash, Err(ChoreoError::TimeConflict { second: 3 })));
    }

    #[test]
    fn builder_rejects_off_grid_positions() {
        let res = ShowBuilder::new(StageConfig::default())
            .dancer("KV", "Kevin")
            .formation(FormationBuilder::new(0.0).place("KV", 30.0, 0.0))
            .build();
        assert!(res.is_err());
    }
}
