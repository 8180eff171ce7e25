//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers configuration
//! loading, which every binary goes through.

use thiserror::Error;

/// The top-level error type for `vc-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `vc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
