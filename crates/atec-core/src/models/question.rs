use serde::{Deserialize, Serialize};

use super::QuestionId;

/// Question metadata used to render recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_id: QuestionId,
    /// Ordinal number of the question inside the questionnaire.
    pub number: i64,
    pub content: String,
    pub area: String,
}
