use crate::aggregate::Aggregate;
use crate::matrix::ScoreRow;

use super::RankedQuestion;

/// Gap mode: questions the target answered on which neighbors averaged lower.
///
/// Score is `aggregate − own`, always negative; most negative first.
pub fn rank_by_gap(target: &ScoreRow, aggregate: &Aggregate) -> Vec<RankedQuestion> {
    let mut ranked: Vec<RankedQuestion> = target
        .iter()
        .filter_map(|(question_id, own)| {
            let gap = aggregate.mean(*question_id)? - own;
            (gap < 0.0).then_some(RankedQuestion {
                question_id: *question_id,
                score: gap,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.question_id.cmp(&b.question_id))
    });
    ranked
}
