//! Shutdown signals — SIGTERM (sent by `docker stop`) and SIGINT.
//!
//! Handlers are registered in [`ShutdownSignals::install`], before the
//! manager starts, so a signal can never be caught without someone
//! waiting for it.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Registered process signal handlers.
pub struct ShutdownSignals {
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    interrupt: Signal,
}

impl ShutdownSignals {
    /// Register the handlers now.
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Resolves on the first shutdown signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.terminate.recv() => {}
            _ = self.interrupt.recv() => {}
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    }

    /// Flip `shutdown` to true on the first signal.
    pub fn forward(mut self, shutdown: watch::Sender<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.recv().await;
            info!("shutdown signal received");
            let _ = shutdown.send(true);
        })
    }
}
