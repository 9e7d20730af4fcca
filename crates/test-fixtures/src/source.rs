//! In-memory [`IAnswerSource`] implementations.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use atec_core::errors::{AtecError, AtecResult, StorageError};
use atec_core::models::{AnswerRecord, ClientId, EvaluationId, QuestionId, QuestionRecord};
use atec_core::traits::IAnswerSource;

/// Metadata for a question with generated text.
pub fn question(question_id: QuestionId) -> QuestionRecord {
    QuestionRecord {
        question_id,
        number: question_id,
        content: format!("Question {question_id}"),
        area: if question_id % 2 == 0 { "motor" } else { "social" }.to_string(),
    }
}

fn created_at(evaluation_id: EvaluationId) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(evaluation_id)
}

/// Answer source backed by plain collections, filtering the same way the
/// SQLite queries do.
#[derive(Debug, Default)]
pub struct InMemoryAnswerSource {
    evaluations: BTreeMap<EvaluationId, ClientId>,
    answers: Vec<AnswerRecord>,
    questions: BTreeMap<QuestionId, QuestionRecord>,
    question_fetches: AtomicUsize,
}

impl InMemoryAnswerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluation, with or without answers.
    pub fn add_evaluation(&mut self, evaluation_id: EvaluationId, client_id: ClientId) -> &mut Self {
        self.evaluations.insert(evaluation_id, client_id);
        self
    }

    /// Record an answer, registering its evaluation if needed.
    pub fn add_answer(
        &mut self,
        evaluation_id: EvaluationId,
        client_id: ClientId,
        question_id: QuestionId,
        score: f64,
    ) -> &mut Self {
        self.evaluations.entry(evaluation_id).or_insert(client_id);
        self.answers.push(AnswerRecord::new(
            evaluation_id,
            client_id,
            question_id,
            score,
            created_at(evaluation_id),
        ));
        self
    }

    pub fn add_question(&mut self, record: QuestionRecord) -> &mut Self {
        self.questions.insert(record.question_id, record);
        self
    }

    /// Add generated metadata for every question that has an answer.
    pub fn add_questions_for_answers(&mut self) -> &mut Self {
        let ids: Vec<QuestionId> = self.answers.iter().map(|a| a.question_id).collect();
        for id in ids {
            self.questions.entry(id).or_insert_with(|| question(id));
        }
        self
    }

    /// How many times `fetch_questions` has been called.
    pub fn question_fetches(&self) -> usize {
        self.question_fetches.load(Ordering::SeqCst)
    }

    /// Answers matching `keep`, ordered by evaluation id then insertion.
    fn select(&self, keep: impl Fn(&AnswerRecord) -> bool) -> Vec<AnswerRecord> {
        let mut rows: Vec<AnswerRecord> = self.answers.iter().filter(|a| keep(a)).cloned().collect();
        rows.sort_by_key(|a| a.evaluation_id);
        rows
    }
}

impl IAnswerSource for InMemoryAnswerSource {
    fn fetch_answers(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<Vec<AnswerRecord>> {
        Ok(self.select(|a| a.client_id != client_id || a.evaluation_id == evaluation_id))
    }

    fn fetch_questions(&self) -> AtecResult<Vec<QuestionRecord>> {
        self.question_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.questions.values().cloned().collect())
    }

    fn fetch_subsequent_answers(
        &self,
        after_evaluation_id: EvaluationId,
        client_id: ClientId,
        limit: usize,
    ) -> AtecResult<Vec<AnswerRecord>> {
        let mut rows =
            self.select(|a| a.evaluation_id > after_evaluation_id && a.client_id == client_id);
        rows.truncate(limit);
        Ok(rows)
    }

    fn evaluation_belongs_to_client(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<bool> {
        Ok(self.evaluations.get(&evaluation_id) == Some(&client_id))
    }
}

/// Which call of a [`FailingAnswerSource`] returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Relation,
    Answers,
    Questions,
    SubsequentAnswers,
}

/// Delegates to an inner source but fails one kind of call with a busy error.
pub struct FailingAnswerSource<S> {
    inner: S,
    fail_on: FailPoint,
}

impl<S: IAnswerSource> FailingAnswerSource<S> {
    pub fn new(inner: S, fail_on: FailPoint) -> Self {
        Self { inner, fail_on }
    }

    fn check(&self, point: FailPoint) -> AtecResult<()> {
        if self.fail_on == point {
            return Err(AtecError::Dependency(StorageError::Busy {
                message: format!("injected failure at {point:?}"),
            }));
        }
        Ok(())
    }
}

impl<S: IAnswerSource> IAnswerSource for FailingAnswerSource<S> {
    fn fetch_answers(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<Vec<AnswerRecord>> {
        self.check(FailPoint::Answers)?;
        self.inner.fetch_answers(client_id, evaluation_id)
    }

    fn fetch_questions(&self) -> AtecResult<Vec<QuestionRecord>> {
        self.check(FailPoint::Questions)?;
        self.inner.fetch_questions()
    }

    fn fetch_subsequent_answers(
        &self,
        after_evaluation_id: EvaluationId,
        client_id: ClientId,
        limit: usize,
    ) -> AtecResult<Vec<AnswerRecord>> {
        self.check(FailPoint::SubsequentAnswers)?;
        self.inner
            .fetch_subsequent_answers(after_evaluation_id, client_id, limit)
    }

    fn evaluation_belongs_to_client(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<bool> {
        self.check(FailPoint::Relation)?;
        self.inner.evaluation_belongs_to_client(client_id, evaluation_id)
    }
}
