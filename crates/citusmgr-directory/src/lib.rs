//! citusmgr-directory — worker membership mutations against the Citus
//! coordinator catalog.
//!
//! # Architecture
//!
//! ```text
//! ClusterDirectory<S>
//!   ├── register(node)   → [AddNode]
//!   └── deregister(node) → [ClearPlacements, RemoveNode]
//!         │
//!         ▼
//!   CatalogSession (one statement per call, auto-commit)
//!   └── PgSession (single sqlx::PgConnection)
//! ```
//!
//! Statements are issued one at a time on one connection with no
//! surrounding transaction. A failure part-way through a deregistration
//! leaves the earlier statements committed.

pub mod directory;
pub mod error;
pub mod session;
pub mod statement;

pub use directory::ClusterDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use session::{CatalogSession, CoordinatorConfig, PgSession};
pub use statement::{CatalogStatement, WorkerNode, WORKER_PORT};
