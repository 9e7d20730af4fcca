//! Wire payload for the recommendation endpoint.

use serde::{Deserialize, Serialize};

use super::{RecommendOutcome, RecommendationItem};

/// JSON body returned to the caller: either the ranked questions or an explanatory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Questions {
        filtered_questions: Vec<RecommendationItem>,
    },
    Message {
        message: String,
    },
}

impl From<RecommendOutcome> for RecommendResponse {
    fn from(outcome: RecommendOutcome) -> Self {
        match outcome {
            RecommendOutcome::Recommendations(items) => Self::Questions {
                filtered_questions: items,
            },
            RecommendOutcome::NoSignal(reason) => Self::Message {
                message: reason.message().to_string(),
            },
        }
    }
}
