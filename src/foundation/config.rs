use std::time::Duration;

use crate::foundation::{
    core::Position,
    error::{ChoreoError, ChoreoResult},
};

/// Stage and transport settings shared by every part of a show.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Side length of the square stage grid, in cells.
    pub grid_size: u32,
    /// Length of the timeline in seconds; playback stops here.
    pub total_duration: f64,
    pub tick_interval_ms: u64,
    /// Seconds of timeline advanced per playback tick.
    pub tick_step: f64,
    pub max_dancers: usize,
    /// Gap used to place a formation added without an explicit time.
    pub formation_spacing: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            grid_size: 12,
            total_duration: 180.0,
            tick_interval_ms: 100,
            tick_step: 0.1,
            max_dancers: 20,
            formation_spacing: 60.0,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> ChoreoResult<()> {
        if self.grid_size == 0 {
            return Err(ChoreoError::validation("grid_size must be > 0"));
        }
        if !(self.total_duration.is_finite() && self.total_duration > 0.0) {
            return Err(ChoreoError::validation("total_duration must be > 0"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ChoreoError::validation("tick_interval_ms must be > 0"));
        }
        if !(self.tick_step.is_finite() && self.tick_step > 0.0) {
            return Err(ChoreoError::validation("tick_step must be > 0"));
        }
        if self.max_dancers == 0 {
            return Err(ChoreoError::validation("max_dancers must be > 0"));
        }
        if !(self.formation_spacing.is_finite() && self.formation_spacing >= 0.0) {
            return Err(ChoreoError::validation("formation_spacing must be >= 0"));
        }
        Ok(())
    }

    /// Default spot for dancers without an explicit position.
    pub fn center(&self) -> Position {
        let c = f64::from(self.grid_size / 2);
        Position::new(c, c)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn contains(&self, pos: Position) -> bool {
        let size = f64::from(self.grid_size);
        (0.0..size).contains(&pos.x) && (0.0..size).contains(&pos.y)
    }

    /// `pos` unchanged when it lies on the grid, `OffStage` otherwise. NaN never does.
    pub fn check_position(&self, pos: Position) -> ChoreoResult<Position> {
        if !self.contains(pos) {
            return Err(ChoreoError::OffStage {
                x: pos.x,
                y: pos.y,
                grid: self.grid_size,
            });
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stage_view() {
        let cfg = StageConfig::default();
        assert_eq!(cfg.grid_size, 12);
        assert_eq!(cfg.center(), Position::new(6.0, 6.0));
        assert_eq!(cfg.tick_interval(), Duration::from_millis(100));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn center_floors_odd_grids() {
        let cfg = StageConfig {
            grid_size: 15,
            ..StageConfig::default()
        };
        assert_eq!(cfg.center(), Position::new(7.0, 7.0));
    }

    #[test]
    fn contains_is_half_open() {
        let cfg = StageConfig::default();
        assert!(cfg.contains(Position::new(0.0, 11.5)));
        assert!(!cfg.contains(Position::new(12.0, 0.0)));
        assert!(!cfg.contains(Position::new(-0.1, 3.0)));
        assert!(!cfg.contains(Position::new(f64::NAN, 3.0)));
    }

    #[test]
    fn check_position_rejects_off_grid_and_nan() {
        let cfg = StageConfig::default();
        assert!(cfg.check_position(Position::new(11.0, 0.0)).is_ok());
        assert!(matches!(
            cfg.check_position(Position::new(40.0, -3.0)),
            Err(ChoreoError::OffStage { grid: 12, .. })
        ));
        assert!(cfg.check_position(Position::new(f64::NAN, 1.0)).is_err());
        assert!(cfg.check_position(Position::new(1.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: StageConfig = serde_json::from_str(r#"{"total_duration": 90.0}"#).unwrap();
        assert_eq!(cfg.total_duration, 90.0);
        assert_eq!(cfg.grid_size, 12);
    }

    #[test]
    fn validate_rejects_zero_grid() {
        let cfg = StageConfig {
            grid_size: 0,
            ..StageConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
