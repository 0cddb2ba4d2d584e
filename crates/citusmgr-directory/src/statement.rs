//! Catalog statements issued on behalf of a worker node.

use std::fmt;

/// Port every worker's Postgres listens on.
pub const WORKER_PORT: u16 = 5432;

/// A worker as seen by the coordinator: host plus port.
///
/// Recomputed for every event, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerNode {
    pub host: String,
    pub port: u16,
}

impl WorkerNode {
    /// A worker on the standard port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: WORKER_PORT,
        }
    }
}

impl fmt::Display for WorkerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One auto-committed mutation of the coordinator catalog.
///
/// Every variant binds `$1 = host` and `$2 = port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatement {
    AddNode(WorkerNode),
    ClearPlacements(WorkerNode),
    RemoveNode(WorkerNode),
}

impl CatalogStatement {
    /// SQL text with positional parameters.
    pub fn sql(&self) -> &'static str {
        match self {
            Self::AddNode(_) => "SELECT master_add_node($1, $2)",
            Self::ClearPlacements(_) => {
                "DELETE FROM pg_dist_placement WHERE groupid = \
                 (SELECT groupid FROM pg_dist_node \
                 WHERE nodename = $1 AND nodeport = $2 LIMIT 1)"
            }
            Self::RemoveNode(_) => "SELECT master_remove_node($1, $2)",
        }
    }

    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddNode(_) => "master_add_node",
            Self::ClearPlacements(_) => "clear_placements",
            Self::RemoveNode(_) => "master_remove_node",
        }
    }

    /// The node whose host and port are bound as parameters.
    pub fn node(&self) -> &WorkerNode {
        match self {
            Self::AddNode(n) | Self::ClearPlacements(n) | Self::RemoveNode(n) => n,
        }
    }
}
