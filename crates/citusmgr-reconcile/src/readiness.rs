//! Readiness marker — tells external health checks the manager is live.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReconcileError, ReconcileResult};

/// Default marker path polled by the compose health check.
pub const DEFAULT_READY_FILE: &str = "/manager-ready";

/// Side effect that marks the process as ready.
pub trait ReadinessSignal: Send + Sync {
    fn signal_ready(&self) -> ReconcileResult<()>;
}

/// Touches a file. Only its existence matters.
#[derive(Debug, Clone)]
pub struct ReadyFile {
    path: PathBuf,
}

impl ReadyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ReadyFile {
    fn default() -> Self {
        Self::new(DEFAULT_READY_FILE)
    }
}

impl ReadinessSignal for ReadyFile {
    fn signal_ready(&self) -> ReconcileResult<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ReconcileError::Readiness {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = ?self.path, "readiness marker created");
        Ok(())
    }
}
