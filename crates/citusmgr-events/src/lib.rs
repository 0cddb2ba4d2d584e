//! citusmgr-events — worker container lifecycle events.
//!
//! Subscribes to the Docker event stream with a server-side filter scoped
//! to one compose project and the `Worker` role, and decodes each message
//! into a [`LifecycleEvent`].
//!
//! # Architecture
//!
//! ```text
//! EventSource
//!   ├── deployment_scope(own container) → compose project label
//!   └── subscribe(ScopeFilter) → BoxStream<LifecycleEvent>
//!         └── DockerEvents (bollard, unix socket)
//! ```
//!
//! The stream is forward-only and starts at the `subscribe` call: events
//! emitted before it are never delivered, and a broken stream is never
//! reopened. The Docker request itself goes out on the first poll.

pub mod docker;
pub mod error;
pub mod event;
pub mod filter;
pub mod source;

pub use docker::{DockerEvents, DEFAULT_DOCKER_SOCKET};
pub use error::{EventError, EventResult};
pub use event::{EventStatus, LifecycleEvent};
pub use filter::{ScopeFilter, COMPOSE_PROJECT_LABEL, ROLE_LABEL, WORKER_ROLE};
pub use source::{EventSource, EventStream};
