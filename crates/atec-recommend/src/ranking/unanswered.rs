use atec_core::config::SortOrder;

use crate::aggregate::Aggregate;
use crate::matrix::ScoreRow;

use super::RankedQuestion;

/// Unanswered mode: aggregated questions the target has not answered.
///
/// An explicit score of 0 also counts as unanswered, matching the zero-filled
/// source data where the two are indistinguishable.
pub fn rank_unanswered(
    target: &ScoreRow,
    aggregate: &Aggregate,
    order: SortOrder,
) -> Vec<RankedQuestion> {
    let mut ranked: Vec<RankedQuestion> = aggregate
        .iter()
        .filter(|(question_id, _)| match target.get(question_id) {
            None => true,
            Some(own) => *own == 0.0,
        })
        .map(|(question_id, agg)| RankedQuestion {
            question_id,
            score: agg.mean,
        })
        .collect();

    ranked.sort_by(|a, b| {
        let by_score = match order {
            SortOrder::Asc => a.score.total_cmp(&b.score),
            SortOrder::Desc => b.score.total_cmp(&a.score),
        };
        by_score.then_with(|| a.question_id.cmp(&b.question_id))
    });
    ranked
}
