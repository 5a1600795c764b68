//! Child item sources and asynchronous fetch execution.
//!
//! [`ChildSource`] is the contract the tree core has with its data backend:
//! given a branch identifier, produce the ordered child listing or fail with
//! a [`LoadError`]. Sources may block (network, simulated latency); the
//! [`FetchPool`] keeps that blocking off the event loop by running each
//! fetch on a detached worker thread and delivering the settled
//! [`FetchOutcome`] over a channel the event loop drains on its timer tick.
//! Commits therefore apply in completion order, not invocation order.

use crate::model::{LoadError, NodeId};
use crate::state::FetchOutcome;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::debug;

pub mod fake_server;

pub use fake_server::{FakeFsServer, ServerOptions};

/// Contract with the external item backend.
///
/// Must be safe to call repeatedly for the same parent; caching fetched
/// children is the tree core's responsibility, though a source may itself
/// cache. Calls may block the calling thread.
pub trait ChildSource<T>: Send + Sync {
    /// Produce the ordered children of `parent`, or fail with a
    /// human-readable error.
    fn fetch_children(&self, parent: &NodeId) -> Result<Vec<T>, LoadError>;
}

/// Executes fetch requests on detached worker threads.
///
/// The pool owns the sending half of the outcome channel; the event loop
/// owns the receiver. Worker send failures are ignored: a closed receiver
/// only happens during shutdown, when the outcome is moot.
pub struct FetchPool<T> {
    source: Arc<dyn ChildSource<T>>,
    outcomes: Sender<FetchOutcome<T>>,
}

impl<T: Send + 'static> FetchPool<T> {
    /// Create a pool delivering outcomes through `outcomes`.
    pub fn new(source: Arc<dyn ChildSource<T>>, outcomes: Sender<FetchOutcome<T>>) -> Self {
        Self { source, outcomes }
    }

    /// Run one fetch for `id` on a fresh worker thread.
    ///
    /// `generation` is stamped onto the outcome so the shell can drop
    /// results that belong to a tree discarded by a root reload. The worker
    /// runs to completion even if the node is collapsed meanwhile; the
    /// outcome still commits (no cancellation at this level).
    pub fn spawn(&self, id: NodeId, generation: u64) {
        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes.clone();
        debug!(id = %id, generation, "spawning child fetch");
        thread::spawn(move || {
            let result = source.fetch_children(&id);
            match &result {
                Ok(children) => debug!(id = %id, count = children.len(), "fetch succeeded"),
                Err(err) => debug!(id = %id, error = %err, "fetch failed"),
            }
            let _ = outcomes.send(FetchOutcome {
                id,
                generation,
                result,
            });
        });
    }
}
