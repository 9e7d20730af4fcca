//! Question metadata.

use rusqlite::Connection;

use atec_core::errors::AtecResult;
use atec_core::models::QuestionRecord;

use crate::to_storage_err;

/// All questions, ordered by id.
pub fn all_questions(conn: &Connection) -> AtecResult<Vec<QuestionRecord>> {
    let mut stmt = conn
        .prepare("SELECT id, number, content, area FROM question ORDER BY id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(QuestionRecord {
                question_id: row.get(0)?,
                number: row.get(1)?,
                content: row.get(2)?,
                area: row.get(3)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
