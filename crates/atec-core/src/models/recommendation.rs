use serde::{Deserialize, Serialize};

use super::QuestionId;

/// One recommended follow-up question, in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub question_id: QuestionId,
    pub number: i64,
    pub content: String,
    pub area: String,
    /// 1-based position in the final list.
    pub rank: usize,
    /// Value the rank was derived from: the gap in gap mode,
    /// the neighbor aggregate in unanswered mode.
    pub score: f64,
}

/// Why a successful computation produced no recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSignalReason {
    /// The target is the only evaluation in the comparison set.
    NoNeighbors,
    /// Neighbors were found but none had answers to aggregate.
    NoNeighborHistory,
    /// Aggregates exist but no question passed the ranking filter.
    NoQualifyingQuestions,
}

impl NoSignalReason {
    /// Human-readable explanation for the response payload.
    pub fn message(self) -> &'static str {
        match self {
            Self::NoNeighbors => "No similar evaluations were found.",
            Self::NoNeighborHistory => "No data returned for the similar evaluations.",
            Self::NoQualifyingQuestions => {
                "Similar evaluations produced no question worth recommending."
            }
        }
    }
}

/// Result of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum RecommendOutcome {
    Recommendations(Vec<RecommendationItem>),
    NoSignal(NoSignalReason),
}

impl RecommendOutcome {
    pub fn is_no_signal(&self) -> bool {
        matches!(self, Self::NoSignal(_))
    }

    /// Recommended items, empty for a no-signal outcome.
    pub fn items(&self) -> &[RecommendationItem] {
        match self {
            Self::Recommendations(items) => items,
            Self::NoSignal(_) => &[],
        }
    }

    /// Question ids in rank order.
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.items().iter().map(|i| i.question_id).collect()
    }
}
