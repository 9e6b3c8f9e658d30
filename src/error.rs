/// Errors surfaced by the workout model and store.
#[derive(Debug, thiserror::Error)]
pub enum WorkoutError {
    #[error("Invalid {field}: expected a {expected} number, got {value}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0:#}")]
    StorageUnavailable(#[from] anyhow::Error),

    #[error("Workout JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WorkoutError {
    /// True for errors caused by what the user typed, as opposed to the environment.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, WorkoutError>;
