pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Failures surfaced by mutating operations on a show.
///
/// Expected conditions (empty input, a full roster, a clashing formation time) are
/// returned as values; callers decide how to notify the user. Operations addressing an
/// id that no longer exists are silent no-ops and never produce an error.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    #[error("dancer name must be non-empty")]
    EmptyName,

    #[error("roster is full ({cap} dancers)")]
    RosterFull { cap: usize },

    #[error("a formation already exists at second {second}")]
    TimeConflict { second: u64 },

    #[error("message text must be non-empty")]
    EmptyMessage,

    #[error("formation time must be finite and >= 0 (got {0})")]
    InvalidTime(f64),

    #[error("position ({x}, {y}) is outside the {grid}x{grid} stage")]
    OffStage { x: f64, y: f64, grid: u32 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
