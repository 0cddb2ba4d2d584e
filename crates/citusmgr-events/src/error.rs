//! Error types for the event source.

use thiserror::Error;

/// Result type alias for event source operations.
pub type EventResult<T> = Result<T, EventError>;

/// Errors from the container runtime or from decoding its events.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("unusable docker socket {socket}: {source}")]
    Connect {
        socket: String,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("failed to inspect container {container}: {source}")]
    Inspect {
        container: String,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("container {container} has no {label} label")]
    MissingScopeLabel { container: String, label: &'static str },

    #[error("event stream error: {0}")]
    Stream(#[from] bollard::errors::Error),

    #[error("event has no status")]
    MissingStatus,

    #[error("unexpected event status: {0}")]
    UnexpectedStatus(String),

    #[error("event for status {status} has no container name")]
    MissingName { status: String },
}
