//! Error types for cowtrie
//!
//! Trie and store reads never fail: a missing key or a value of another
//! type is reported as `None`. Errors only come from the ambient layer,
//! such as loading a [`StoreConfig`](crate::StoreConfig).

use thiserror::Error;

/// Result type alias for cowtrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cowtrie operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
