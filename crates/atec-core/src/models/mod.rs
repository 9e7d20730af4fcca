//! Shared data models: fetched records and recommendation output.

pub mod answer;
pub mod question;
pub mod recommendation;
pub mod response;

pub use answer::AnswerRecord;
pub use question::QuestionRecord;
pub use recommendation::{NoSignalReason, RecommendOutcome, RecommendationItem};
pub use response::RecommendResponse;

/// Identifier of a single completed questionnaire.
pub type EvaluationId = i64;
/// Identifier of the client (test-taker) an evaluation belongs to.
pub type ClientId = i64;
/// Identifier of a questionnaire item.
pub type QuestionId = i64;
