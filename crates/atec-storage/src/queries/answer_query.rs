//! Answer fetches: the comparison set and a client's later evaluations.
//!
//! Rows are ordered by evaluation id, then answer insertion order, so duplicate
//! answers resolve last-write-wins deterministically downstream.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use atec_core::errors::AtecResult;
use atec_core::models::{AnswerRecord, ClientId, EvaluationId};

use crate::{malformed, to_storage_err};

/// The joined answer columns (5 columns, indices 0-4).
const ANSWER_SELECT: &str = "
    SELECT avaliation.id, avaliation.client, question.id, item.score, avaliation.created_at
    FROM avaliation
    INNER JOIN answer ON avaliation.id = answer.avaliation
    INNER JOIN item ON item.id = answer.item
    INNER JOIN question ON question.id = answer.question";

/// Answers of every evaluation not owned by `client_id`, plus `evaluation_id`'s own.
pub fn comparison_set(
    conn: &Connection,
    client_id: ClientId,
    evaluation_id: EvaluationId,
) -> AtecResult<Vec<AnswerRecord>> {
    let sql = format!(
        "{ANSWER_SELECT}
         WHERE avaliation.client != ?1 OR avaliation.id = ?2
         ORDER BY avaliation.id, answer.id"
    );
    let mut stmt = conn.prepare(&sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![client_id, evaluation_id], read_raw)
        .map_err(to_storage_err)?;
    collect_records(rows)
}

/// Answers of `client_id`'s evaluations after `after_evaluation_id`, capped at `limit` rows.
pub fn subsequent(
    conn: &Connection,
    after_evaluation_id: EvaluationId,
    client_id: ClientId,
    limit: usize,
) -> AtecResult<Vec<AnswerRecord>> {
    let sql = format!(
        "{ANSWER_SELECT}
         WHERE avaliation.id > ?1 AND avaliation.client = ?2
         ORDER BY avaliation.id, answer.id
         LIMIT ?3"
    );
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![after_evaluation_id, client_id, limit], read_raw)
        .map_err(to_storage_err)?;
    collect_records(rows)
}

type RawAnswer = (i64, i64, i64, f64, String);

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawAnswer> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn collect_records<I>(rows: I) -> AtecResult<Vec<AnswerRecord>>
where
    I: Iterator<Item = rusqlite::Result<RawAnswer>>,
{
    rows.map(|row| {
        let (evaluation_id, client_id, question_id, score, created_at) =
            row.map_err(to_storage_err)?;
        if !score.is_finite() {
            return Err(malformed(
                "item",
                format!("non-finite score for evaluation {evaluation_id}, question {question_id}"),
            ));
        }
        Ok(AnswerRecord {
            evaluation_id,
            client_id,
            question_id,
            score,
            timestamp: parse_timestamp(&created_at)?,
        })
    })
    .collect()
}

fn parse_timestamp(s: &str) -> AtecResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| malformed("avaliation", format!("parse created_at '{s}': {e}")))
}
