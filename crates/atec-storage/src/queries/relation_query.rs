//! Evaluation ownership check.

use rusqlite::{params, Connection};

use atec_core::errors::AtecResult;
use atec_core::models::{ClientId, EvaluationId};

use crate::to_storage_err;

/// Whether `evaluation_id` exists and belongs to `client_id`.
pub fn belongs_to_client(
    conn: &Connection,
    client_id: ClientId,
    evaluation_id: EvaluationId,
) -> AtecResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM avaliation WHERE client = ?1 AND id = ?2)",
        params![client_id, evaluation_id],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}
