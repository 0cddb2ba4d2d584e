//! In-memory stand-ins for Docker, the coordinator, and the readiness file.
//!
//! Every fake writes into one shared [`Journal`] so tests can assert on
//! the global order of side effects.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use citusmgr_directory::{CatalogSession, CatalogStatement, DirectoryError, DirectoryResult};
use citusmgr_events::{
    EventError, EventResult, EventSource, EventStream, LifecycleEvent, ScopeFilter,
    COMPOSE_PROJECT_LABEL, ROLE_LABEL, WORKER_ROLE,
};
use citusmgr_reconcile::{Phase, ReadinessSignal, ReconcileResult, Reconciler};

pub const PROJECT: &str = "citus";
pub const MANAGER: &str = "citus_manager";

/// An observable side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Connected,
    ScopeLookup,
    Subscribed,
    Ready,
    Statement(CatalogStatement),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Entry>>>);

impl Journal {
    pub fn push(&self, entry: Entry) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.lock().unwrap().clone()
    }

    pub fn statements(&self) -> Vec<CatalogStatement> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Statement(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

/// A Docker event before filtering and decoding.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub action: String,
    pub name: String,
    pub labels: HashMap<String, String>,
}

impl RawEvent {
    pub fn new(action: &str, name: &str, project: &str, role: &str) -> Self {
        Self {
            action: action.to_string(),
            name: name.to_string(),
            labels: HashMap::from([
                (COMPOSE_PROJECT_LABEL.to_string(), project.to_string()),
                (ROLE_LABEL.to_string(), role.to_string()),
            ]),
        }
    }

    /// A worker event in the test project.
    pub fn worker(action: &str, name: &str) -> Self {
        Self::new(action, name, PROJECT, WORKER_ROLE)
    }

    pub fn healthy(name: &str) -> Self {
        Self::worker("health_status: healthy", name)
    }

    pub fn destroy(name: &str) -> Self {
        Self::worker("destroy", name)
    }

    /// Whether the Docker daemon would deliver this event for `query`.
    fn matches(&self, query: &HashMap<String, Vec<String>>) -> bool {
        let event_ok = query
            .get("event")
            .is_some_and(|events| events.contains(&self.action));
        let labels_ok = query.get("label").is_some_and(|labels| {
            labels.iter().all(|kv| match kv.split_once('=') {
                Some((k, v)) => self.labels.get(k).map(String::as_str) == Some(v),
                None => self.labels.contains_key(kv),
            })
        });
        event_ok && labels_ok
    }

    fn decode(self) -> EventResult<LifecycleEvent> {
        Ok(LifecycleEvent {
            status: self.action.parse()?,
            node_identity: self.name,
            scope_labels: self.labels,
        })
    }
}

/// Fake container runtime applying filters the way the daemon does.
pub struct FakeRuntime {
    journal: Journal,
    containers: HashMap<String, String>,
    events: Mutex<Option<UnboundedReceiver<RawEvent>>>,
    /// When false, every event is delivered regardless of the filter.
    pub filtering: bool,
}

impl FakeRuntime {
    /// A runtime where the manager container belongs to [`PROJECT`].
    pub fn new(journal: &Journal) -> (Self, UnboundedSender<RawEvent>) {
        let (tx, rx) = mpsc::unbounded();
        let runtime = Self {
            journal: journal.clone(),
            containers: HashMap::from([(MANAGER.to_string(), PROJECT.to_string())]),
            events: Mutex::new(Some(rx)),
            filtering: true,
        };
        (runtime, tx)
    }

    pub fn without_containers(mut self) -> Self {
        self.containers.clear();
        self
    }
}

#[async_trait]
impl EventSource for FakeRuntime {
    async fn deployment_scope(&self, container: &str) -> EventResult<String> {
        self.journal.push(Entry::ScopeLookup);
        self.containers
            .get(container)
            .cloned()
            .ok_or_else(|| EventError::MissingScopeLabel {
                container: container.to_string(),
                label: COMPOSE_PROJECT_LABEL,
            })
    }

    async fn subscribe<'a>(&'a self, filter: &ScopeFilter) -> EventResult<EventStream<'a>> {
        let rx = self
            .events
            .lock()
            .unwrap()
            .take()
            .expect("subscribed twice");
        self.journal.push(Entry::Subscribed);

        let query = filter.query();
        let filtering = self.filtering;
        Ok(rx
            .filter_map(move |raw| {
                let deliver = !filtering || raw.matches(&query);
                futures::future::ready(deliver.then(|| raw.decode()))
            })
            .boxed())
    }
}

/// Fake coordinator session; fails the `fail_at`-th statement (0-based).
pub struct FakeSession {
    journal: Journal,
    calls: usize,
    fail_at: Option<usize>,
}

impl FakeSession {
    pub fn new(journal: &Journal, fail_at: Option<usize>) -> Self {
        Self {
            journal: journal.clone(),
            calls: 0,
            fail_at,
        }
    }
}

#[async_trait]
impl CatalogSession for FakeSession {
    async fn execute(&mut self, statement: &CatalogStatement) -> DirectoryResult<()> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(DirectoryError::Statement {
                statement: statement.name(),
                host: statement.node().host.clone(),
                port: statement.node().port,
                source: sqlx::Error::Protocol("server closed the connection".into()),
            });
        }
        self.journal.push(Entry::Statement(statement.clone()));
        Ok(())
    }
}

pub struct FakeReadiness {
    journal: Journal,
}

impl FakeReadiness {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl ReadinessSignal for FakeReadiness {
    fn signal_ready(&self) -> ReconcileResult<()> {
        self.journal.push(Entry::Ready);
        Ok(())
    }
}

/// A reconciler running on its own task.
pub struct Running {
    pub handle: JoinHandle<ReconcileResult<()>>,
    pub shutdown: watch::Sender<bool>,
    pub phase: watch::Receiver<Phase>,
}

impl Running {
    /// Wait for the loop to end.
    pub async fn join(self) -> ReconcileResult<()> {
        let Running { handle, shutdown, .. } = self;
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("reconciler did not stop")
            .expect("reconciler panicked");
        drop(shutdown);
        result
    }

    pub async fn wait_for_phase(&mut self, phase: Phase) {
        tokio::time::timeout(Duration::from_secs(5), self.phase.wait_for(|p| *p == phase))
            .await
            .expect("phase not reached")
            .expect("phase sender dropped");
    }
}

/// Spawn a reconciler whose coordinator session fails at `fail_at`.
pub fn spawn(runtime: FakeRuntime, journal: &Journal, fail_at: Option<usize>) -> Running {
    let session = FakeSession::new(journal, fail_at);
    let connected = journal.clone();
    spawn_with(runtime, journal, async move {
        connected.push(Entry::Connected);
        Ok(session)
    })
}

/// Spawn a reconciler with a custom connect future.
pub fn spawn_with<C>(runtime: FakeRuntime, journal: &Journal, connect: C) -> Running
where
    C: Future<Output = DirectoryResult<FakeSession>> + Send + 'static,
{
    let reconciler = Reconciler::new(runtime, FakeReadiness::new(journal), MANAGER);
    let phase = reconciler.phase();
    let (shutdown, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(reconciler.run(connect, shutdown_rx));
    Running {
        handle,
        shutdown,
        phase,
    }
}

/// Send `events`, close the stream, and wait for the loop to end.
pub async fn feed(
    running: Running,
    tx: UnboundedSender<RawEvent>,
    events: Vec<RawEvent>,
) -> ReconcileResult<()> {
    for event in events {
        tx.unbounded_send(event).unwrap();
    }
    drop(tx);
    running.join().await
}
