use crate::errors::AtecResult;
use crate::models::{AnswerRecord, ClientId, EvaluationId, QuestionRecord};

/// Read access to evaluations, answers, and question metadata.
///
/// Implementations return empty vectors, never errors, when nothing matches.
/// Failures to reach the backing store surface as [`AtecError::Dependency`](crate::AtecError::Dependency);
/// the recommender does not retry.
pub trait IAnswerSource: Send + Sync {
    /// Answers of every evaluation not owned by `client_id`, plus the answers of
    /// `evaluation_id` itself.
    fn fetch_answers(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<Vec<AnswerRecord>>;

    /// All known questions.
    fn fetch_questions(&self) -> AtecResult<Vec<QuestionRecord>>;

    /// Answers of `client_id`'s evaluations with an id greater than
    /// `after_evaluation_id`, at most `limit` rows.
    fn fetch_subsequent_answers(
        &self,
        after_evaluation_id: EvaluationId,
        client_id: ClientId,
        limit: usize,
    ) -> AtecResult<Vec<AnswerRecord>>;

    /// Whether `evaluation_id` exists and belongs to `client_id`.
    fn evaluation_belongs_to_client(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<bool>;
}
