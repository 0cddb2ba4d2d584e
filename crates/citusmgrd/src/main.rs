//! citusmgrd — the Citus membership manager daemon.
//!
//! Watches worker containers of its own compose project and keeps the
//! coordinator's node list in step:
//! - worker turns healthy → `master_add_node`
//! - worker destroyed → placements cleared, `master_remove_node`
//!
//! # Usage
//!
//! ```text
//! CITUS_HOST=master POSTGRES_PASSWORD=secret citusmgrd
//! ```

mod manager;
mod signals;

use clap::{Parser, ValueEnum};

use citusmgr_events::DEFAULT_DOCKER_SOCKET;
use citusmgr_reconcile::DEFAULT_READY_FILE;

#[derive(Parser, Debug)]
#[command(name = "citusmgrd", about = "Citus worker membership manager")]
pub struct Cli {
    /// Coordinator hostname.
    #[arg(long, env = "CITUS_HOST", default_value = "master")]
    pub citus_host: String,

    /// Coordinator user.
    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    pub postgres_user: String,

    /// Coordinator password.
    #[arg(long, env = "POSTGRES_PASSWORD", default_value = "", hide_env_values = true)]
    pub postgres_password: String,

    /// Coordinator database. Defaults to the user name.
    #[arg(long, env = "POSTGRES_DB")]
    pub postgres_db: Option<String>,

    /// This process's own container (name or id).
    #[arg(long, env = "HOSTNAME")]
    pub container: String,

    /// Docker daemon unix socket.
    #[arg(long, env = "DOCKER_SOCKET", default_value = DEFAULT_DOCKER_SOCKET)]
    pub docker_socket: String,

    /// Marker file created once events are being consumed.
    #[arg(long, env = "MANAGER_READY_FILE", default_value = DEFAULT_READY_FILE)]
    pub ready_file: String,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    manager::run_manager(cli).await
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,citusmgr=debug"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
