//! Error types for the feynmind-store crate.
//!
//! All progress operations return [`StoreError`] via [`StoreResult`].

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while recording study progress.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record violates a field constraint and was not written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP exchange with the external store failed.
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The external store rejected the write.  `body` is a bounded excerpt
    /// of the response.
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The store client could not be configured.
    #[error("config error: {0}")]
    Config(String),
}
