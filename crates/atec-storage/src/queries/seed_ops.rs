//! Inserts used by data loaders and tests.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use atec_core::errors::AtecResult;
use atec_core::models::{ClientId, EvaluationId, QuestionId, QuestionRecord};

use crate::to_storage_err;

pub fn insert_evaluation(
    conn: &Connection,
    evaluation_id: EvaluationId,
    client_id: ClientId,
    created_at: DateTime<Utc>,
) -> AtecResult<()> {
    conn.execute(
        "INSERT INTO avaliation (id, client, created_at) VALUES (?1, ?2, ?3)",
        params![
            evaluation_id,
            client_id,
            created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_question(conn: &Connection, question: &QuestionRecord) -> AtecResult<()> {
    conn.execute(
        "INSERT INTO question (id, number, content, area) VALUES (?1, ?2, ?3, ?4)",
        params![
            question.question_id,
            question.number,
            question.content,
            question.area
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_item(conn: &Connection, item_id: i64, score: f64) -> AtecResult<()> {
    conn.execute(
        "INSERT INTO item (id, score) VALUES (?1, ?2)",
        params![item_id, score],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Record that `evaluation_id` chose `item_id` for `question_id`. Returns the answer row id.
pub fn insert_answer(
    conn: &Connection,
    evaluation_id: EvaluationId,
    question_id: QuestionId,
    item_id: i64,
) -> AtecResult<i64> {
    conn.execute(
        "INSERT INTO answer (avaliation, question, item) VALUES (?1, ?2, ?3)",
        params![evaluation_id, question_id, item_id],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}
