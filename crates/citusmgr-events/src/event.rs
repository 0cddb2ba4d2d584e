//! Lifecycle events and their decoding from Docker event messages.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bollard::models::EventMessage;

use crate::error::{EventError, EventResult};

/// Container statuses the manager acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// The container's health check passed.
    NodeHealthy,
    /// The container was removed.
    NodeDestroyed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 2] = [EventStatus::NodeHealthy, EventStatus::NodeDestroyed];

    /// The action string Docker reports for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NodeHealthy => "health_status: healthy",
            Self::NodeDestroyed => "destroy",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "health_status: healthy" => Ok(Self::NodeHealthy),
            "destroy" => Ok(Self::NodeDestroyed),
            other => Err(EventError::UnexpectedStatus(other.to_string())),
        }
    }
}

/// A worker container lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub status: EventStatus,
    /// Container name, which is also the worker's hostname.
    pub node_identity: String,
    /// Remaining actor attributes (labels, image, ...).
    pub scope_labels: HashMap<String, String>,
}

impl LifecycleEvent {
    pub fn new(status: EventStatus, node_identity: impl Into<String>) -> Self {
        Self {
            status,
            node_identity: node_identity.into(),
            scope_labels: HashMap::new(),
        }
    }

    /// Decode a raw Docker event message.
    ///
    /// The status comes from the message action and the identity from
    /// the actor's `name` attribute. An action outside [`EventStatus`]
    /// is an error, not a skip.
    pub fn from_message(message: EventMessage) -> EventResult<Self> {
        let action = message.action.ok_or(EventError::MissingStatus)?;
        let status: EventStatus = action.parse()?;

        let mut attributes = message
            .actor
            .and_then(|actor| actor.attributes)
            .unwrap_or_default();
        let node_identity = attributes
            .remove("name")
            .ok_or(EventError::MissingName { status: action })?;

        Ok(Self {
            status,
            node_identity,
            scope_labels: attributes,
        })
    }
}
