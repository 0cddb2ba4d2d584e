//! Manager mode — wires Docker, the coordinator, and the readiness
//! marker into a reconciler and runs it until SIGTERM or Ctrl-C.
//!
//! Startup order follows the reconciler phases: the coordinator is dialled
//! first, and the Docker daemon is first contacted when the manager looks
//! up its own container.

use tokio::sync::watch;
use tracing::info;

use citusmgr_directory::{CoordinatorConfig, PgSession};
use citusmgr_events::DockerEvents;
use citusmgr_reconcile::{ReadyFile, Reconciler};

use crate::signals::ShutdownSignals;
use crate::Cli;

/// Run the manager. Returns `Ok` only after a shutdown signal.
pub async fn run_manager(cli: Cli) -> anyhow::Result<()> {
    info!(container = %cli.container, "citus manager starting");

    // ── Shutdown signal ──────────────────────────────────────────
    let signals = ShutdownSignals::install()?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let forwarder = signals.forward(shutdown_tx);

    let coordinator = coordinator_config(&cli);
    let docker = DockerEvents::new(&cli.docker_socket)?;
    let reconciler = Reconciler::new(docker, ReadyFile::new(&cli.ready_file), &cli.container);

    let result = reconciler
        .run(PgSession::connect(&coordinator), shutdown_rx)
        .await;
    forwarder.abort();
    result?;

    info!("citus manager stopped");
    Ok(())
}

fn coordinator_config(cli: &Cli) -> CoordinatorConfig {
    CoordinatorConfig::new(
        cli.citus_host.clone(),
        cli.postgres_user.clone(),
        cli.postgres_password.clone(),
        cli.postgres_db.clone(),
    )
}
