//! Golden recommendation scenarios stored as JSON.

use serde::Deserialize;

use atec_core::config::RecommendConfig;
use atec_core::models::{ClientId, EvaluationId, NoSignalReason, QuestionId, QuestionRecord};

use crate::source::InMemoryAnswerSource;

/// One request against a small data set, with its expected result.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub client_id: ClientId,
    pub evaluation_id: EvaluationId,
    /// Fields left out take their defaults.
    #[serde(default)]
    pub config: RecommendConfig,
    /// `[evaluation_id, client_id, question_id, score]` in fetch order.
    pub answers: Vec<(EvaluationId, ClientId, QuestionId, f64)>,
    /// `[evaluation_id, client_id]` for evaluations that have no answers.
    #[serde(default)]
    pub evaluations: Vec<(EvaluationId, ClientId)>,
    /// Question metadata; generated for every answered question when empty.
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    pub expected: Expected,
}

/// What a scenario's request must produce.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// Question ids in rank order.
    Recommendations(Vec<QuestionId>),
    NoSignal(NoSignalReason),
    /// Stable error code, e.g. `NOT_FOUND`.
    Error(String),
}

impl Scenario {
    /// Build the scenario's data set.
    pub fn source(&self) -> InMemoryAnswerSource {
        let mut source = InMemoryAnswerSource::new();
        for &(evaluation_id, client_id) in &self.evaluations {
            source.add_evaluation(evaluation_id, client_id);
        }
        for &(evaluation_id, client_id, question_id, score) in &self.answers {
            source.add_answer(evaluation_id, client_id, question_id, score);
        }
        if self.questions.is_empty() {
            source.add_questions_for_answers();
        } else {
            for record in &self.questions {
                source.add_question(record.clone());
            }
        }
        source
    }
}
