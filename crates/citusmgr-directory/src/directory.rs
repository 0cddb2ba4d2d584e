//! Cluster directory — register and deregister worker nodes.

use tracing::info;

use crate::error::DirectoryResult;
use crate::session::CatalogSession;
use crate::statement::{CatalogStatement, WorkerNode};

/// Issues membership intents against the coordinator catalog.
///
/// Never reads the current membership before acting. Whether a
/// repeated add or a remove of an unknown node succeeds is up to the
/// coordinator.
pub struct ClusterDirectory<S> {
    session: S,
}

impl<S: CatalogSession> ClusterDirectory<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Add a worker to the cluster.
    pub async fn register(&mut self, node: &WorkerNode) -> DirectoryResult<()> {
        info!(host = %node.host, port = node.port, "adding worker");
        self.run(&[CatalogStatement::AddNode(node.clone())]).await
    }

    /// Drop a worker's placements, then remove it from the cluster.
    ///
    /// The two statements commit independently. If the removal fails the
    /// placements stay deleted.
    pub async fn deregister(&mut self, node: &WorkerNode) -> DirectoryResult<()> {
        info!(host = %node.host, port = node.port, "removing worker");
        self.run(&[
            CatalogStatement::ClearPlacements(node.clone()),
            CatalogStatement::RemoveNode(node.clone()),
        ])
        .await
    }

    /// Borrow the underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    async fn run(&mut self, statements: &[CatalogStatement]) -> DirectoryResult<()> {
        for statement in statements {
            self.session.execute(statement).await?;
        }
        Ok(())
    }
}
