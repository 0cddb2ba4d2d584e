//! The reconciliation loop.
//!
//! A `Reconciler` owns the event source and the readiness signal. The
//! coordinator session is handed to [`Reconciler::run`] as a connect
//! future so the whole lifecycle, dial included, runs under one
//! shutdown receiver.

use std::future::Future;

use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info};

use citusmgr_directory::{CatalogSession, ClusterDirectory, DirectoryResult};
use citusmgr_events::{EventSource, LifecycleEvent, ScopeFilter};

use crate::action::Action;
use crate::error::{ReconcileError, ReconcileResult};
use crate::readiness::ReadinessSignal;

/// Where the loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dialing the coordinator.
    Connecting,
    /// Resolving scope, subscribing, signalling readiness.
    Ready,
    /// Applying events.
    Consuming,
    /// Stopped on request.
    Terminated,
}

/// Applies worker lifecycle events to cluster membership, one at a time.
pub struct Reconciler<E, R> {
    source: E,
    readiness: R,
    /// This process's own container; its compose project scopes events.
    own_container: String,
    phase: watch::Sender<Phase>,
}

impl<E, R> Reconciler<E, R>
where
    E: EventSource,
    R: ReadinessSignal,
{
    pub fn new(source: E, readiness: R, own_container: impl Into<String>) -> Self {
        let (phase, _) = watch::channel(Phase::Connecting);
        Self {
            source,
            readiness,
            own_container: own_container.into(),
            phase,
        }
    }

    /// Follow phase transitions.
    pub fn phase(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Run until `shutdown` turns true or something fails.
    ///
    /// Returns `Ok(())` only on shutdown. A closed event stream, an
    /// undecodable event, or any catalog error ends the loop with an
    /// error. The shutdown request is honored while waiting (to connect,
    /// to subscribe, for the next event) but never interrupts a catalog
    /// mutation that has started.
    pub async fn run<S, C>(
        self,
        connect: C,
        mut shutdown: watch::Receiver<bool>,
    ) -> ReconcileResult<()>
    where
        S: CatalogSession,
        C: Future<Output = DirectoryResult<S>>,
    {
        self.enter(Phase::Connecting);
        let Some(session) = until_shutdown(&mut shutdown, connect).await else {
            self.terminate();
            return Ok(());
        };
        let mut directory = ClusterDirectory::new(session?);

        self.enter(Phase::Ready);
        let Some(project) =
            until_shutdown(&mut shutdown, self.source.deployment_scope(&self.own_container)).await
        else {
            self.terminate();
            return Ok(());
        };
        let filter = ScopeFilter::for_project(project?);

        let Some(events) = until_shutdown(&mut shutdown, self.source.subscribe(&filter)).await
        else {
            self.terminate();
            return Ok(());
        };
        let mut events = events?;

        self.readiness.signal_ready()?;
        info!(project = %filter.deployment_group_id, "listening for events");

        self.enter(Phase::Consuming);
        loop {
            let stop = *shutdown.borrow();
            if stop {
                break;
            }

            let next = tokio::select! {
                biased;
                _ = cancelled(&mut shutdown) => break,
                next = events.next() => next,
            };

            let event = next.ok_or(ReconcileError::StreamClosed)??;
            dispatch(&mut directory, &event).await?;
        }

        self.terminate();
        Ok(())
    }

    fn enter(&self, phase: Phase) {
        debug!(?phase, "reconciler phase");
        self.phase.send_replace(phase);
    }

    fn terminate(&self) {
        info!("shutting down");
        self.enter(Phase::Terminated);
    }
}

/// Apply one event. Returns once every statement it issues has committed.
async fn dispatch<S: CatalogSession>(
    directory: &mut ClusterDirectory<S>,
    event: &LifecycleEvent,
) -> ReconcileResult<()> {
    debug!(status = %event.status, node = %event.node_identity, "event received");
    match Action::for_event(event) {
        Action::Register(node) => directory.register(&node).await?,
        Action::Deregister(node) => directory.deregister(&node).await?,
    }
    Ok(())
}

/// Resolves once shutdown is requested. Pends forever if the sender is gone.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    let closed = shutdown.wait_for(|stop| *stop).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

/// Await `fut` unless shutdown is requested first.
async fn until_shutdown<F: Future>(
    shutdown: &mut watch::Receiver<bool>,
    fut: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancelled(shutdown) => None,
        out = fut => Some(out),
    }
}
