use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientId, EvaluationId, QuestionId};

/// A single answer fact as fetched from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub evaluation_id: EvaluationId,
    pub client_id: ClientId,
    pub question_id: QuestionId,
    /// Score of the chosen item.
    pub score: f64,
    /// Creation time of the evaluation the answer belongs to.
    pub timestamp: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn new(
        evaluation_id: EvaluationId,
        client_id: ClientId,
        question_id: QuestionId,
        score: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            evaluation_id,
            client_id,
            question_id,
            score,
            timestamp,
        }
    }
}
