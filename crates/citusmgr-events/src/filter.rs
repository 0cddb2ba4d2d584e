//! Scope filter — which events the runtime should deliver.

use std::collections::HashMap;

use crate::event::EventStatus;

/// Label holding the compose project a container belongs to.
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
/// Label holding a container's Citus role.
pub const ROLE_LABEL: &str = "com.citusdata.role";
/// Role value for worker containers.
pub const WORKER_ROLE: &str = "Worker";

/// Server-side event filter for one deployment group.
///
/// Built once at startup and constant afterwards. The runtime applies it;
/// nothing is re-checked client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    pub deployment_group_id: String,
    pub role_label: String,
    pub event_types: Vec<EventStatus>,
}

impl ScopeFilter {
    /// Worker health/destroy events within a compose project.
    pub fn for_project(deployment_group_id: impl Into<String>) -> Self {
        Self {
            deployment_group_id: deployment_group_id.into(),
            role_label: WORKER_ROLE.to_string(),
            event_types: EventStatus::ALL.to_vec(),
        }
    }

    /// Render as Docker `/events` filters.
    pub fn query(&self) -> HashMap<String, Vec<String>> {
        HashMap::from([
            ("type".to_string(), vec!["container".to_string()]),
            (
                "event".to_string(),
                self.event_types.iter().map(|s| s.as_str().to_string()).collect(),
            ),
            (
                "label".to_string(),
                vec![
                    format!("{COMPOSE_PROJECT_LABEL}={}", self.deployment_group_id),
                    format!("{ROLE_LABEL}={}", self.role_label),
                ],
            ),
        ])
    }
}
