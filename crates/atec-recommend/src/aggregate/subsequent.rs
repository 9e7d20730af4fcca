use std::collections::BTreeMap;

use atec_core::errors::{AtecError, AtecResult};
use atec_core::models::{AnswerRecord, EvaluationId};
use atec_core::traits::IAnswerSource;

use crate::matrix::RatingMatrix;
use crate::neighbors::Neighbor;

use super::Aggregate;

/// Later-evaluation answers per neighbor, keyed by neighbor evaluation id.
pub type NeighborHistories = BTreeMap<EvaluationId, Vec<AnswerRecord>>;

/// Fetch, for each neighbor, the answers of its client's evaluations after it.
///
/// The neighbor's client comes from `matrix`; a neighbor the matrix does not
/// know is reported as [`AtecError::NotFound`].
pub fn fetch_histories<S>(
    source: &S,
    matrix: &RatingMatrix,
    neighbors: &[Neighbor],
    limit: usize,
) -> AtecResult<NeighborHistories>
where
    S: IAnswerSource + ?Sized,
{
    let mut histories = NeighborHistories::new();
    for neighbor in neighbors {
        let client_id = matrix.client_of(neighbor.evaluation_id).ok_or_else(|| {
            AtecError::not_found(neighbor.evaluation_id, "neighbor absent from the rating matrix")
        })?;
        let answers = source.fetch_subsequent_answers(neighbor.evaluation_id, client_id, limit)?;
        tracing::debug!(
            neighbor = neighbor.evaluation_id,
            client_id,
            rows = answers.len(),
            "fetched neighbor history"
        );
        histories.insert(neighbor.evaluation_id, answers);
    }
    Ok(histories)
}

/// Subsequent scope: aggregate every later evaluation found for the neighbors.
///
/// Records are pivoted per evaluation first, so a later evaluation reached
/// through two neighbors of the same client counts once.
pub fn aggregate_subsequent(histories: &NeighborHistories) -> Aggregate {
    let records: Vec<AnswerRecord> = histories.values().flatten().cloned().collect();
    match RatingMatrix::build(&records) {
        Ok(later) => Aggregate::from_rows(later.rows().map(|(_, row)| row)),
        // No history at all.
        Err(_) => Aggregate::default(),
    }
}
