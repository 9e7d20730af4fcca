//! Ranking strategies: turn neighbor aggregates into an ordered question list.
//!
//! | Mode | Candidates | Order |
//! |------|------------|-------|
//! | Gap | Questions the target answered where `aggregate − own < 0` | gap ascending |
//! | Unanswered | Aggregated questions the target has not answered | aggregate, asc or desc |
//!
//! Ties always go to the lower question id, so output never depends on input order.

pub mod gap;
pub mod unanswered;

pub use gap::rank_by_gap;
pub use unanswered::rank_unanswered;

use serde::{Deserialize, Serialize};

use atec_core::config::{RankingMode, SortOrder};
use atec_core::models::QuestionId;

use crate::aggregate::Aggregate;
use crate::matrix::ScoreRow;

/// A question that passed the mode's filter, with the value it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedQuestion {
    pub question_id: QuestionId,
    pub score: f64,
}

/// Rank with the configured mode and keep the top `limit`.
pub fn rank(
    mode: RankingMode,
    order: SortOrder,
    target: &ScoreRow,
    aggregate: &Aggregate,
    limit: usize,
) -> Vec<RankedQuestion> {
    let mut ranked = match mode {
        RankingMode::Gap => rank_by_gap(target, aggregate),
        RankingMode::Unanswered => rank_unanswered(target, aggregate, order),
    };
    ranked.truncate(limit);
    ranked
}
