//! Nearest-neighbor selection over the similarity matrix.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use atec_core::errors::{AtecError, AtecResult};
use atec_core::models::EvaluationId;

use crate::similarity::SimilarityMatrix;

/// An evaluation selected for its similarity to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub evaluation_id: EvaluationId,
    pub similarity: f64,
}

/// Pick the `k` evaluations most similar to `target`.
///
/// The target is always excluded. Ties on similarity go to the lower
/// evaluation id. Returns fewer than `k` when fewer candidates exist.
pub fn select_neighbors(
    target: EvaluationId,
    similarity: &SimilarityMatrix,
    k: usize,
) -> AtecResult<Vec<Neighbor>> {
    let row = similarity
        .row(target)
        .ok_or_else(|| AtecError::not_found(target, "absent from the similarity matrix"))?;

    let mut candidates: Vec<Neighbor> = row
        .filter(|(id, _)| *id != target)
        .map(|(evaluation_id, similarity)| Neighbor {
            evaluation_id,
            similarity,
        })
        .collect();

    candidates.sort_by(by_similarity_desc);
    candidates.truncate(k);
    Ok(candidates)
}

fn by_similarity_desc(a: &Neighbor, b: &Neighbor) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.evaluation_id.cmp(&b.evaluation_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RatingMatrix;
    use atec_core::models::AnswerRecord;
    use chrono::Utc;

    fn similarity(cells: &[(EvaluationId, i64, f64)]) -> SimilarityMatrix {
        let answers: Vec<AnswerRecord> = cells
            .iter()
            .map(|(e, q, s)| AnswerRecord::new(*e, 100 + *e, *q, *s, Utc::now()))
            .collect();
        SimilarityMatrix::compute(&RatingMatrix::build(&answers).unwrap(), 0.0)
    }

    fn ids(neighbors: &[Neighbor]) -> Vec<EvaluationId> {
        neighbors.iter().map(|n| n.evaluation_id).collect()
    }

    #[test]
    fn closest_pattern_wins() {
        let sim = similarity(&[(1, 1, 5.0), (1, 2, 3.0), (2, 1, 5.0), (2, 2, 3.0), (3, 1, 1.0), (3, 2, 1.0)]);
        let neighbors = select_neighbors(1, &sim, 1).unwrap();
        assert_eq!(ids(&neighbors), vec![2]);
    }

    #[test]
    fn target_is_never_returned() {
        let sim = similarity(&[(1, 1, 1.0), (2, 1, 1.0), (3, 1, 1.0)]);
        let neighbors = select_neighbors(2, &sim, 10).unwrap();
        assert_eq!(ids(&neighbors), vec![1, 3]);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let sim = similarity(&[(9, 1, 2.0), (4, 1, 3.0), (7, 1, 1.0), (1, 1, 5.0)]);
        let neighbors = select_neighbors(1, &sim, 2).unwrap();
        assert_eq!(ids(&neighbors), vec![4, 7]);
    }

    #[test]
    fn unknown_target_is_not_found() {
        let sim = similarity(&[(1, 1, 1.0)]);
        let err = select_neighbors(5, &sim, 3).unwrap_err();
        assert!(matches!(err, AtecError::NotFound { evaluation_id: 5, .. }));
    }

    #[test]
    fn single_row_yields_no_neighbors() {
        let sim = similarity(&[(1, 1, 1.0)]);
        assert!(select_neighbors(1, &sim, 5).unwrap().is_empty());
    }
}
