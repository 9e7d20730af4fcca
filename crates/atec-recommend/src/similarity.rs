//! Pairwise cosine similarity between the rows of a rating matrix.

use std::collections::HashMap;

use atec_core::models::EvaluationId;

use crate::matrix::RatingMatrix;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude, and clamps rounding
/// overshoot into [-1, 1]. Never NaN for finite input.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let norm_a = norm(a);
    let norm_b = norm(b);
    cosine_with_norms(a, b, norm_a, norm_b)
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn cosine_with_norms(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Symmetric evaluation × evaluation cosine similarity matrix.
///
/// The diagonal is exactly 1.0 for rows with non-zero magnitude and 0.0 for
/// all-zero rows.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    ids: Vec<EvaluationId>,
    index: HashMap<EvaluationId, usize>,
    /// Row-major `ids.len()²` values.
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute similarity over the dense rows of `matrix`, missing cells set to `fill_value`.
    pub fn compute(matrix: &RatingMatrix, fill_value: f64) -> Self {
        let ids: Vec<EvaluationId> = matrix.evaluation_ids().collect();
        let vectors: Vec<Vec<f64>> = ids
            .iter()
            .filter_map(|id| matrix.dense_row(*id, fill_value))
            .collect();
        let norms: Vec<f64> = vectors.iter().map(|v| norm(v)).collect();

        let n = ids.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
            for j in (i + 1)..n {
                let sim = cosine_with_norms(&vectors[i], &vectors[j], norms[i], norms[j]);
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        let index = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        tracing::debug!(
            evaluations = n,
            questions = matrix.question_ids().len(),
            "computed similarity matrix"
        );
        Self { ids, index, values }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, evaluation_id: EvaluationId) -> bool {
        self.index.contains_key(&evaluation_id)
    }

    /// Evaluation ids in the matrix's row order (ascending).
    pub fn ids(&self) -> &[EvaluationId] {
        &self.ids
    }

    /// sim(a, b), or `None` if either id is unknown.
    pub fn get(&self, a: EvaluationId, b: EvaluationId) -> Option<f64> {
        let i = *self.index.get(&a)?;
        let j = *self.index.get(&b)?;
        Some(self.values[i * self.ids.len() + j])
    }

    /// `(other_id, sim(a, other_id))` for every row, including `a` itself.
    pub fn row(
        &self,
        a: EvaluationId,
    ) -> Option<impl Iterator<Item = (EvaluationId, f64)> + '_> {
        let i = *self.index.get(&a)?;
        let n = self.ids.len();
        Some(
            self.ids
                .iter()
                .copied()
                .zip(self.values[i * n..(i + 1) * n].iter().copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atec_core::models::AnswerRecord;
    use chrono::Utc;

    fn matrix(cells: &[(EvaluationId, i64, f64)]) -> RatingMatrix {
        let answers: Vec<AnswerRecord> = cells
            .iter()
            .map(|(e, q, s)| AnswerRecord::new(*e, *e, *q, *s, Utc::now()))
            .collect();
        RatingMatrix::build(&answers).unwrap()
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero_not_nan() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(sim, 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn scale_does_not_change_similarity() {
        let m = matrix(&[(1, 1, 5.0), (1, 2, 3.0), (2, 1, 10.0), (2, 2, 6.0), (3, 1, 1.0), (3, 2, 1.0)]);
        let sim = SimilarityMatrix::compute(&m, 0.0);
        let s12 = sim.get(1, 2).unwrap();
        assert!((s12 - 1.0).abs() < 1e-12);
        assert!(sim.get(1, 3).unwrap() < s12);
    }

    #[test]
    fn diagonal_is_exact_and_zero_rows_score_zero() {
        let m = matrix(&[(1, 1, 0.0), (2, 1, 3.0), (2, 2, 7.0)]);
        let sim = SimilarityMatrix::compute(&m, 0.0);
        assert_eq!(sim.get(1, 1), Some(0.0));
        assert_eq!(sim.get(2, 2), Some(1.0));
        assert_eq!(sim.get(1, 2), Some(0.0));
    }

    #[test]
    fn matrix_is_symmetric() {
        let m = matrix(&[(1, 1, 4.0), (1, 3, 1.0), (2, 2, 5.0), (2, 3, 2.0), (3, 1, 2.0)]);
        let sim = SimilarityMatrix::compute(&m, 0.0);
        for &a in sim.ids() {
            for &b in sim.ids() {
                assert_eq!(sim.get(a, b), sim.get(b, a));
            }
        }
    }

    #[test]
    fn fill_value_changes_vectors_for_missing_cells() {
        let m = matrix(&[(1, 1, 1.0), (2, 2, 1.0)]);
        assert_eq!(SimilarityMatrix::compute(&m, 0.0).get(1, 2), Some(0.0));
        let filled = SimilarityMatrix::compute(&m, 1.0).get(1, 2).unwrap();
        assert!((filled - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_ids_return_none() {
        let sim = SimilarityMatrix::compute(&matrix(&[(1, 1, 1.0)]), 0.0);
        assert_eq!(sim.get(1, 9), None);
        assert!(sim.row(9).is_none());
        assert_eq!(sim.row(1).map(|r| r.count()), Some(1));
    }
}
