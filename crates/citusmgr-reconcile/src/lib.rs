//! citusmgr-reconcile — keeps Citus worker membership in step with
//! worker container lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Connecting ──► Ready ──► Consuming ──► Terminated
//!   dial           scope      event → Action → ClusterDirectory
//!   coordinator    subscribe  (one at a time, in delivery order)
//!                  readiness
//! ```
//!
//! Readiness is signalled only after `subscribe` has returned, which fixes
//! the point from which events are delivered. With the Docker source the
//! HTTP request is sent on the first poll, right after readiness, and the
//! stream is anchored at the subscribe instant so nothing in between is
//! missed. Connection errors on that request end the loop.
//! Shutdown is cooperative: it interrupts waits but never an in-flight
//! catalog mutation. Every error is returned to the caller; nothing is
//! retried.

pub mod action;
pub mod error;
pub mod readiness;
pub mod reconciler;

pub use action::Action;
pub use error::{ReconcileError, ReconcileResult};
pub use readiness::{ReadinessSignal, ReadyFile, DEFAULT_READY_FILE};
pub use reconciler::{Phase, Reconciler};
