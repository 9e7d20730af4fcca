//! # atec-storage
//!
//! SQLite-backed implementation of [`IAnswerSource`](atec_core::IAnswerSource).
//! Owns the schema (versioned migrations), a write connection, a read pool,
//! and the seeding helpers used by tests and data loaders.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use atec_core::errors::{AtecError, StorageError};
use rusqlite::ErrorCode;

/// Convert a rusqlite error into the workspace error type.
/// Lock contention that outlived `busy_timeout` is reported as [`StorageError::Busy`].
pub(crate) fn to_storage_err(e: rusqlite::Error) -> AtecError {
    let busy = matches!(
        e.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    );
    let message = e.to_string();
    if busy {
        StorageError::Busy { message }.into()
    } else {
        StorageError::SqliteError { message }.into()
    }
}

/// Build a malformed-row error for `table`.
pub(crate) fn malformed(table: &str, message: impl Into<String>) -> AtecError {
    StorageError::MalformedRow {
        table: table.to_string(),
        message: message.into(),
    }
    .into()
}
