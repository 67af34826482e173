use thiserror::Error;

/// Error type for loading, enrichment, query and ranking failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("survey data at '{path}' is unavailable: {reason}")]
    DataUnavailable { path: String, reason: String },
    #[error("record {id} has no value for required column '{column}'")]
    Schema { id: u64, column: &'static str },
    #[error("record {id} rates '{column}' as {value}, outside 0-5")]
    RatingOutOfRange {
        id: u64,
        column: &'static str,
        value: u8,
    },
    #[error("unknown dimension '{0}'")]
    UnknownDimension(String),
    #[error("feature importance cannot be computed: {0}")]
    Training(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    pub(crate) fn unavailable(path: impl std::fmt::Display, reason: impl ToString) -> Self {
        EngineError::DataUnavailable {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for errors scoped to a single request; the shared dataset is unaffected.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownDimension(_) | EngineError::Training(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
