//! Error types for the cluster directory client.

use thiserror::Error;

/// Result type alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors raised while talking to the coordinator catalog.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to connect to coordinator {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{statement} failed for {host}:{port}: {source}")]
    Statement {
        statement: &'static str,
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },
}
