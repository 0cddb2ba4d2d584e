//! Coordinator connection.
//!
//! A `CatalogSession` executes one statement per call. `PgSession` is
//! the production implementation: a single `PgConnection` outside any
//! transaction, so Postgres commits every statement on its own.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::{debug, info};

use crate::error::{DirectoryError, DirectoryResult};
use crate::statement::CatalogStatement;

/// Executes catalog statements against the coordinator.
#[async_trait]
pub trait CatalogSession: Send {
    /// Execute one statement. It is committed once this returns `Ok`.
    async fn execute(&mut self, statement: &CatalogStatement) -> DirectoryResult<()>;
}

/// Coordinator connection parameters.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl CoordinatorConfig {
    /// Build a config, defaulting the database name to the user name.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: Option<String>,
    ) -> Self {
        let user = user.into();
        Self {
            host: host.into(),
            database: database.unwrap_or_else(|| user.clone()),
            user,
            password: password.into(),
        }
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

/// A single auto-commit connection to the coordinator.
pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    /// Dial the coordinator once.
    ///
    /// The coordinator is expected to be up before the manager starts,
    /// so a failure here is returned as-is with no retry.
    pub async fn connect(config: &CoordinatorConfig) -> DirectoryResult<Self> {
        let conn = PgConnection::connect_with(&config.connect_options())
            .await
            .map_err(|source| DirectoryError::Connect {
                host: config.host.clone(),
                source,
            })?;

        info!(host = %config.host, database = %config.database, "connected to coordinator");
        Ok(Self { conn })
    }
}

#[async_trait]
impl CatalogSession for PgSession {
    async fn execute(&mut self, statement: &CatalogStatement) -> DirectoryResult<()> {
        let node = statement.node();
        let result = sqlx::query(statement.sql())
            .bind(&node.host)
            .bind(i32::from(node.port))
            .execute(&mut self.conn)
            .await
            .map_err(|source| DirectoryError::Statement {
                statement: statement.name(),
                host: node.host.clone(),
                port: node.port,
                source,
            })?;

        debug!(
            statement = statement.name(),
            %node,
            rows = result.rows_affected(),
            "catalog statement committed"
        );
        Ok(())
    }
}
