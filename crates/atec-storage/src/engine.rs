//! StorageEngine: owns the ConnectionPool, implements IAnswerSource,
//! runs migrations on open.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use atec_core::config::StorageConfig;
use atec_core::errors::AtecResult;
use atec_core::models::{AnswerRecord, ClientId, EvaluationId, QuestionId, QuestionRecord};
use atec_core::traits::IAnswerSource;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{answer_query, question_query, relation_query, seed_ops};

/// The SQLite answer source. Owns the connection pool and serves every
/// [`IAnswerSource`] fetch.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open the database at `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> AtecResult<Self> {
        Self::open(Path::new(&config.db_path), config)
    }

    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> AtecResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        tracing::info!(path = %path.display(), readers = config.read_pool_size, "opened answer store");
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    /// All reads go through the writer since there is no read pool.
    pub fn open_in_memory() -> AtecResult<Self> {
        let config = StorageConfig::default();
        let pool = ConnectionPool::open_in_memory(config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> AtecResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> AtecResult<T>
    where
        F: FnOnce(&Connection) -> AtecResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    pub fn insert_evaluation(
        &self,
        evaluation_id: EvaluationId,
        client_id: ClientId,
        created_at: DateTime<Utc>,
    ) -> AtecResult<()> {
        self.pool.writer.with_conn(|conn| {
            seed_ops::insert_evaluation(conn, evaluation_id, client_id, created_at)
        })
    }

    pub fn insert_question(&self, question: &QuestionRecord) -> AtecResult<()> {
        self.pool
            .writer
            .with_conn(|conn| seed_ops::insert_question(conn, question))
    }

    pub fn insert_item(&self, item_id: i64, score: f64) -> AtecResult<()> {
        self.pool
            .writer
            .with_conn(|conn| seed_ops::insert_item(conn, item_id, score))
    }

    pub fn insert_answer(
        &self,
        evaluation_id: EvaluationId,
        question_id: QuestionId,
        item_id: i64,
    ) -> AtecResult<i64> {
        self.pool.writer.with_conn(|conn| {
            seed_ops::insert_answer(conn, evaluation_id, question_id, item_id)
        })
    }
}

impl IAnswerSource for StorageEngine {
    fn fetch_answers(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<Vec<AnswerRecord>> {
        let answers = self.with_reader(|conn| {
            answer_query::comparison_set(conn, client_id, evaluation_id)
        })?;
        tracing::debug!(client_id, evaluation_id, rows = answers.len(), "fetched comparison set");
        Ok(answers)
    }

    fn fetch_questions(&self) -> AtecResult<Vec<QuestionRecord>> {
        self.with_reader(question_query::all_questions)
    }

    fn fetch_subsequent_answers(
        &self,
        after_evaluation_id: EvaluationId,
        client_id: ClientId,
        limit: usize,
    ) -> AtecResult<Vec<AnswerRecord>> {
        self.with_reader(|conn| {
            answer_query::subsequent(conn, after_evaluation_id, client_id, limit)
        })
    }

    fn evaluation_belongs_to_client(
        &self,
        client_id: ClientId,
        evaluation_id: EvaluationId,
    ) -> AtecResult<bool> {
        self.with_reader(|conn| relation_query::belongs_to_client(conn, client_id, evaluation_id))
    }
}
