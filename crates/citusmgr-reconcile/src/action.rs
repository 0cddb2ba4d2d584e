//! Event → membership action mapping.

use citusmgr_directory::WorkerNode;
use citusmgr_events::{EventStatus, LifecycleEvent};

/// The membership change an event calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register(WorkerNode),
    Deregister(WorkerNode),
}

impl Action {
    /// Map an event to its action. The container name is the worker host.
    pub fn for_event(event: &LifecycleEvent) -> Self {
        let node = WorkerNode::new(event.node_identity.clone());
        match event.status {
            EventStatus::NodeHealthy => Self::Register(node),
            EventStatus::NodeDestroyed => Self::Deregister(node),
        }
    }

    pub fn node(&self) -> &WorkerNode {
        match self {
            Self::Register(node) | Self::Deregister(node) => node,
        }
    }
}
