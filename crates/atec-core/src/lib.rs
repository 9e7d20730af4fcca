//! # atec-core
//!
//! Foundation crate for the ATEC question recommender.
//! Defines the shared types, the data-source trait, errors, config, and logging setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{AtecConfig, RecommendConfig};
pub use errors::{AtecError, AtecResult};
pub use models::{
    AnswerRecord, ClientId, EvaluationId, NoSignalReason, QuestionId, QuestionRecord,
    RecommendOutcome, RecommendationItem,
};
pub use traits::IAnswerSource;
