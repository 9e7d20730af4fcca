//! Per-question aggregation of neighbor answers.
//!
//! ## 2 Scopes
//!
//! | Scope | Rows aggregated |
//! |-------|-----------------|
//! | Full | Each neighbor's own row of the rating matrix |
//! | Subsequent | Every later evaluation of each neighbor's client |
//!
//! Both scopes reduce to the same shape: a set of answered-score rows.
//! A question's aggregate is the mean over the rows that answered it; rows
//! without an answer are skipped rather than counted as zero, and questions
//! nobody answered are left out.

pub mod full;
pub mod subsequent;

pub use full::aggregate_full;
pub use subsequent::{aggregate_subsequent, fetch_histories, NeighborHistories};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atec_core::models::QuestionId;

use crate::matrix::ScoreRow;

/// Mean score of one question across the rows that answered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestionAggregate {
    pub mean: f64,
    /// Rows that had an answer for the question; always ≥ 1.
    pub contributors: usize,
}

/// question_id → aggregate, ordered by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    by_question: BTreeMap<QuestionId, QuestionAggregate>,
}

impl Aggregate {
    /// Mean each question over the rows that answered it.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoreRow>,
    {
        let mut sums: BTreeMap<QuestionId, (f64, usize)> = BTreeMap::new();
        for row in rows {
            for (question_id, score) in row {
                let entry = sums.entry(*question_id).or_insert((0.0, 0));
                entry.0 += score;
                entry.1 += 1;
            }
        }

        let by_question = sums
            .into_iter()
            .map(|(question_id, (sum, count))| {
                (
                    question_id,
                    QuestionAggregate {
                        mean: sum / count as f64,
                        contributors: count,
                    },
                )
            })
            .collect();
        Self { by_question }
    }

    pub fn len(&self) -> usize {
        self.by_question.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_question.is_empty()
    }

    pub fn get(&self, question_id: QuestionId) -> Option<&QuestionAggregate> {
        self.by_question.get(&question_id)
    }

    pub fn mean(&self, question_id: QuestionId) -> Option<f64> {
        self.get(question_id).map(|a| a.mean)
    }

    /// `(question_id, aggregate)` in ascending question order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &QuestionAggregate)> + '_ {
        self.by_question.iter().map(|(q, a)| (*q, a))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.by_question.keys().copied()
    }
}
