use super::error_code::{self, AtecErrorCode};
use super::{ConfigError, StorageError};
use crate::models::EvaluationId;

/// Top-level error returned by every fallible recommender operation.
///
/// "No signal" is deliberately absent: an empty recommendation is a
/// successful [`RecommendOutcome`](crate::models::RecommendOutcome).
#[derive(Debug, thiserror::Error)]
pub enum AtecError {
    #[error("evaluation {evaluation_id} not found: {detail}")]
    NotFound {
        evaluation_id: EvaluationId,
        detail: String,
    },

    #[error("no answer data available for comparison")]
    EmptyInput,

    #[error("dependency failure: {0}")]
    Dependency(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience alias used across the workspace.
pub type AtecResult<T> = Result<T, AtecError>;

impl AtecError {
    /// Build a [`AtecError::NotFound`] with a short description of where the lookup failed.
    pub fn not_found(evaluation_id: EvaluationId, detail: impl Into<String>) -> Self {
        Self::NotFound {
            evaluation_id,
            detail: detail.into(),
        }
    }
}

impl AtecErrorCode for AtecError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::EmptyInput => error_code::NO_DATA,
            Self::Dependency(_) => error_code::DEPENDENCY_FAILED,
            Self::Config(e) => e.error_code(),
        }
    }
}
