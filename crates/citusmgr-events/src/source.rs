//! The `EventSource` seam between the runtime and the reconciler.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::EventResult;
use crate::event::LifecycleEvent;
use crate::filter::ScopeFilter;

/// Lazy, ordered, unbounded stream of decoded events.
pub type EventStream<'a> = BoxStream<'a, EventResult<LifecycleEvent>>;

/// A container runtime that can describe its containers and stream events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Read the deployment group of `container` (normally this process's own).
    async fn deployment_scope(&self, container: &str) -> EventResult<String>;

    /// Open the filtered subscription.
    ///
    /// Every event emitted after this call starts is delivered, in order.
    /// Implementations may defer contacting the runtime until the stream
    /// is first polled ([`DockerEvents`](crate::DockerEvents) does, and
    /// anchors the stream at the call instant instead). Errors opening
    /// the stream can therefore arrive as its first item.
    async fn subscribe<'a>(&'a self, filter: &ScopeFilter) -> EventResult<EventStream<'a>>;
}
