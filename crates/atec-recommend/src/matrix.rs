//! Rating matrix: evaluations × questions.
//!
//! Only answered cells are stored. A missing cell is reported as [`Cell::Missing`]
//! and resolves to the caller's fill value where a dense vector is needed, so the
//! zero-fill used for similarity never leaks into neighbor means.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use atec_core::errors::{AtecError, AtecResult};
use atec_core::models::{AnswerRecord, ClientId, EvaluationId, QuestionId};

/// One (evaluation, question) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Answered(f64),
    Missing,
}

impl Cell {
    /// Score used in dense vectors: the answer, or `fill` when unanswered.
    pub fn resolve(self, fill: f64) -> f64 {
        match self {
            Self::Answered(score) => score,
            Self::Missing => fill,
        }
    }

    pub fn score(self) -> Option<f64> {
        match self {
            Self::Answered(score) => Some(score),
            Self::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Answered scores of a single evaluation, keyed by question.
pub type ScoreRow = BTreeMap<QuestionId, f64>;

/// Evaluation × question score matrix built from flat answer records.
///
/// Rows and columns are kept in ascending id order.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    rows: BTreeMap<EvaluationId, ScoreRow>,
    clients: BTreeMap<EvaluationId, ClientId>,
    questions: Vec<QuestionId>,
}

impl RatingMatrix {
    /// Pivot answer records into a matrix.
    ///
    /// Duplicate answers to the same (evaluation, question) resolve
    /// last-write-wins by input order. Fails with [`AtecError::EmptyInput`]
    /// when `answers` is empty.
    pub fn build(answers: &[AnswerRecord]) -> AtecResult<Self> {
        if answers.is_empty() {
            return Err(AtecError::EmptyInput);
        }

        let mut rows: BTreeMap<EvaluationId, ScoreRow> = BTreeMap::new();
        let mut clients: BTreeMap<EvaluationId, ClientId> = BTreeMap::new();
        let mut questions = BTreeSet::new();
        let mut overwritten = 0usize;

        for answer in answers {
            let row = rows.entry(answer.evaluation_id).or_default();
            if row.insert(answer.question_id, answer.score).is_some() {
                overwritten += 1;
            }
            match clients.entry(answer.evaluation_id) {
                Entry::Vacant(slot) => {
                    slot.insert(answer.client_id);
                }
                Entry::Occupied(mut slot) => {
                    if *slot.get() != answer.client_id {
                        tracing::warn!(
                            evaluation_id = answer.evaluation_id,
                            previous = *slot.get(),
                            current = answer.client_id,
                            "evaluation reported under two clients, keeping the last"
                        );
                        slot.insert(answer.client_id);
                    }
                }
            }
            questions.insert(answer.question_id);
        }

        if overwritten > 0 {
            tracing::debug!(overwritten, "duplicate answers resolved last-write-wins");
        }

        Ok(Self {
            rows,
            clients,
            questions: questions.into_iter().collect(),
        })
    }

    /// Number of evaluations (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a built matrix.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, evaluation_id: EvaluationId) -> bool {
        self.rows.contains_key(&evaluation_id)
    }

    /// Row ids in ascending order.
    pub fn evaluation_ids(&self) -> impl Iterator<Item = EvaluationId> + '_ {
        self.rows.keys().copied()
    }

    /// Column ids in ascending order.
    pub fn question_ids(&self) -> &[QuestionId] {
        &self.questions
    }

    pub fn client_of(&self, evaluation_id: EvaluationId) -> Option<ClientId> {
        self.clients.get(&evaluation_id).copied()
    }

    /// Answered scores of one evaluation.
    pub fn row(&self, evaluation_id: EvaluationId) -> Option<&ScoreRow> {
        self.rows.get(&evaluation_id)
    }

    /// Iterate `(evaluation_id, answered scores)` in ascending id order.
    pub fn rows(&self) -> impl Iterator<Item = (EvaluationId, &ScoreRow)> + '_ {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn cell(&self, evaluation_id: EvaluationId, question_id: QuestionId) -> Cell {
        self.rows
            .get(&evaluation_id)
            .and_then(|row| row.get(&question_id))
            .map_or(Cell::Missing, |score| Cell::Answered(*score))
    }

    /// The evaluation's scores aligned to [`question_ids`](Self::question_ids),
    /// missing cells replaced by `fill`.
    pub fn dense_row(&self, evaluation_id: EvaluationId, fill: f64) -> Option<Vec<f64>> {
        let row = self.rows.get(&evaluation_id)?;
        Some(
            self.questions
                .iter()
                .map(|q| row.get(q).copied().unwrap_or(fill))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn answer(e: EvaluationId, c: ClientId, q: QuestionId, score: f64) -> AnswerRecord {
        AnswerRecord::new(e, c, q, score, Utc::now())
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(RatingMatrix::build(&[]), Err(AtecError::EmptyInput)));
    }

    #[test]
    fn rows_and_columns_are_sorted_distinct_ids() {
        let m = RatingMatrix::build(&[
            answer(3, 1, 20, 1.0),
            answer(1, 2, 10, 2.0),
            answer(3, 1, 10, 4.0),
        ])
        .unwrap();
        assert_eq!(m.evaluation_ids().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(m.question_ids(), &[10, 20]);
        assert_eq!(m.client_of(3), Some(1));
    }

    #[test]
    fn missing_cells_are_tracked_and_filled_on_demand() {
        let m = RatingMatrix::build(&[answer(1, 1, 10, 2.0), answer(2, 1, 20, 3.0)]).unwrap();
        assert_eq!(m.cell(1, 20), Cell::Missing);
        assert_eq!(m.cell(1, 10), Cell::Answered(2.0));
        assert_eq!(m.dense_row(1, 0.0), Some(vec![2.0, 0.0]));
        assert_eq!(m.dense_row(1, 9.0), Some(vec![2.0, 9.0]));
        assert_eq!(m.dense_row(7, 0.0), None);
    }

    #[test]
    fn duplicate_answers_keep_the_last_one() {
        let m = RatingMatrix::build(&[
            answer(1, 1, 10, 2.0),
            answer(1, 1, 10, 5.0),
            answer(1, 1, 10, 3.0),
        ])
        .unwrap();
        assert_eq!(m.cell(1, 10), Cell::Answered(3.0));
        assert_eq!(m.row(1).map(|r| r.len()), Some(1));
    }

    #[test]
    fn answered_zero_is_not_missing() {
        let m = RatingMatrix::build(&[answer(1, 1, 10, 0.0)]).unwrap();
        assert!(!m.cell(1, 10).is_missing());
        assert_eq!(m.cell(1, 10).score(), Some(0.0));
    }
}
