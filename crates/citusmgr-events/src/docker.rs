//! Docker implementation of [`EventSource`] over bollard.
//!
//! Building a [`DockerEvents`] does no I/O. The daemon is first contacted
//! by [`EventSource::deployment_scope`], and the `/events` request is only
//! sent when the returned stream is first polled.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use bollard::query_parameters::{EventsOptionsBuilder, InspectContainerOptions};
use bollard::Docker;
use futures::StreamExt;
use tracing::{debug, info};

use crate::error::{EventError, EventResult};
use crate::event::LifecycleEvent;
use crate::filter::{ScopeFilter, COMPOSE_PROJECT_LABEL};
use crate::source::{EventSource, EventStream};

/// Default Docker daemon socket.
pub const DEFAULT_DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Request timeout bollard requires at construction, in seconds. Applies to
/// every Docker request, including the `/events` request.
const CLIENT_TIMEOUT_SECS: u64 = 120;

/// Docker daemon client.
#[derive(Clone)]
pub struct DockerEvents {
    client: Docker,
}

impl DockerEvents {
    /// Build a client for the daemon on a unix socket.
    ///
    /// Fails only if the socket path does not exist.
    pub fn new(socket: &str) -> EventResult<Self> {
        let client =
            Docker::connect_with_socket(socket, CLIENT_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION)
                .map_err(|source| EventError::Connect {
                    socket: socket.to_string(),
                    source,
                })?;

        debug!(%socket, "docker client created");
        Ok(Self { client })
    }
}

#[async_trait]
impl EventSource for DockerEvents {
    async fn deployment_scope(&self, container: &str) -> EventResult<String> {
        let inspect = self
            .client
            .inspect_container(container, None::<InspectContainerOptions>)
            .await
            .map_err(|source| EventError::Inspect {
                container: container.to_string(),
                source,
            })?;

        let project = inspect
            .config
            .and_then(|config| config.labels)
            .and_then(|mut labels| labels.remove(COMPOSE_PROJECT_LABEL))
            .ok_or_else(|| EventError::MissingScopeLabel {
                container: container.to_string(),
                label: COMPOSE_PROJECT_LABEL,
            })?;

        info!(%container, compose_project = %project, "found compose project");
        Ok(project)
    }

    /// Returns before the daemon is contacted. The request carries
    /// `since` set to the call instant (nanosecond precision), so the
    /// stream starts exactly there: events emitted before the call are
    /// not delivered, events emitted between the call and the first poll
    /// are. Connection errors surface on the first poll.
    async fn subscribe<'a>(&'a self, filter: &ScopeFilter) -> EventResult<EventStream<'a>> {
        let query = filter.query();
        let since = since_param(epoch_now());
        debug!(?query, %since, "subscribing to docker events");

        let options = EventsOptionsBuilder::default()
            .since(&since)
            .filters(&query)
            .build();
        let stream = self
            .client
            .events(Some(options))
            .map(|message| LifecycleEvent::from_message(message?))
            .boxed();

        Ok(stream)
    }
}

/// Docker `since` value: `<secs>.<nanos>`.
fn since_param(at: Duration) -> String {
    format!("{}.{:09}", at.as_secs(), at.subsec_nanos())
}

fn epoch_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}
