// Single source of truth for all default values.

// --- Recommendation ---
pub const DEFAULT_NEIGHBOR_COUNT: usize = 5;
pub const DEFAULT_RESULT_COUNT: usize = 5;
pub const DEFAULT_FILL_VALUE: f64 = 0.0;
pub const DEFAULT_SUBSEQUENT_LIMIT: usize = 77;
pub const DEFAULT_CACHE_QUESTIONS: bool = true;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "atec.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const MAX_READ_POOL_SIZE: usize = 8;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
