//! Question metadata lookup.
//!
//! Built once from [`IAnswerSource::fetch_questions`] and never mutated, so a
//! single `Arc<QuestionCatalog>` can serve every request without locking.

use std::collections::HashMap;

use atec_core::errors::AtecResult;
use atec_core::models::{QuestionId, QuestionRecord, RecommendationItem};
use atec_core::traits::IAnswerSource;

use crate::ranking::RankedQuestion;

/// Read-only question metadata keyed by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    by_id: HashMap<QuestionId, QuestionRecord>,
}

impl QuestionCatalog {
    /// Fetch every question from `source`.
    pub fn load<S>(source: &S) -> AtecResult<Self>
    where
        S: IAnswerSource + ?Sized,
    {
        let catalog = Self::from_records(source.fetch_questions()?);
        tracing::debug!(questions = catalog.len(), "loaded question catalog");
        Ok(catalog)
    }

    pub fn from_records(records: impl IntoIterator<Item = QuestionRecord>) -> Self {
        Self {
            by_id: records
                .into_iter()
                .map(|record| (record.question_id, record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, question_id: QuestionId) -> Option<&QuestionRecord> {
        self.by_id.get(&question_id)
    }

    /// Attach metadata to ranked questions, keeping their order.
    ///
    /// Questions without metadata are dropped; ranks are assigned after the
    /// join so they stay contiguous from 1.
    pub fn join(&self, ranked: &[RankedQuestion]) -> Vec<RecommendationItem> {
        ranked
            .iter()
            .filter_map(|r| {
                let record = self.get(r.question_id);
                if record.is_none() {
                    tracing::warn!(question_id = r.question_id, "ranked question has no metadata");
                }
                record.map(|record| (r, record))
            })
            .enumerate()
            .map(|(i, (r, record))| RecommendationItem {
                question_id: record.question_id,
                number: record.number,
                content: record.content.clone(),
                area: record.area.clone(),
                rank: i + 1,
                score: r.score,
            })
            .collect()
    }
}
