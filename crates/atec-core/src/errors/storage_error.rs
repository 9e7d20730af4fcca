use super::error_code::{self, AtecErrorCode};

/// Storage-layer errors for the answer data source.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("database busy, busy timeout elapsed: {message}")]
    Busy { message: String },

    #[error("malformed row in {table}: {message}")]
    MalformedRow { table: String, message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("connection lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl AtecErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Busy { .. } => error_code::DB_BUSY,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
