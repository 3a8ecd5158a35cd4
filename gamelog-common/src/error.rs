//! Common error types for gamelog

use thiserror::Error;

/// Common result type for gamelog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the ingestion pipeline.
///
/// All variants are fatal: the run is meant to be re-invoked externally,
/// so nothing here is retried or partially recovered.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration line (source list, genre side
    /// table, or database config). Raised before any network or database I/O.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP fetch failure (wraps the transport's message)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON failure: unparsable source body, or a result map that cannot
    /// be serialized (in which case no output artifact is written)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
