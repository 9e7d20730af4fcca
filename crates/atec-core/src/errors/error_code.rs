//! AtecErrorCode trait for boundary conversion.

/// Trait for converting ATEC errors to stable error code strings.
/// The HTTP boundary maps these to status codes
/// (`NOT_FOUND` → 404, `NO_DATA` → 422, `DEPENDENCY_FAILED` → 503).
pub trait AtecErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the service boundary.
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const NO_DATA: &str = "NO_DATA";
pub const DEPENDENCY_FAILED: &str = "DEPENDENCY_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
