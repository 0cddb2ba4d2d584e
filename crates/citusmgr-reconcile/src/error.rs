//! Error types for the reconciliation loop.

use std::path::PathBuf;

use thiserror::Error;

use citusmgr_directory::DirectoryError;
use citusmgr_events::EventError;

/// Result type alias for the reconciliation loop.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Anything that stops the loop other than a shutdown request.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Events(#[from] EventError),

    #[error("failed to create readiness marker {path}: {source}")]
    Readiness {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event stream closed")]
    StreamClosed,
}
