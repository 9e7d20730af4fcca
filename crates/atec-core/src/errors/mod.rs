//! Error handling for ATEC.
//! One error enum per subsystem, `thiserror` only.

pub mod atec_error;
pub mod config_error;
pub mod error_code;
pub mod storage_error;

pub use atec_error::{AtecError, AtecResult};
pub use config_error::ConfigError;
pub use error_code::AtecErrorCode;
pub use storage_error::StorageError;
