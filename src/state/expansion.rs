//! Expansion orchestration: when does a toggle warrant a fetch.
//!
//! Pure decision functions following the pure-core / impure-shell split: the
//! shell calls [`handle_toggle`] / [`handle_retry`] on a user action, spawns
//! the returned [`FetchRequest`] (if any) on the fetch pool, and later feeds
//! the worker's [`FetchOutcome`] back through [`commit_outcome`]. The
//! concurrency contract lives entirely in the decision predicate: at most
//! one fetch is ever in flight per node.

use crate::model::{LoadError, NodeId, TreeItem};
use crate::state::TreeState;

/// Fallback message when a load error carries no text.
const GENERIC_FETCH_FAILURE: &str = "Failed to load children";

/// A fetch the shell must execute for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifier of the branch whose children should be fetched.
    pub id: NodeId,
}

/// Settled result of a fetch, delivered back to the event loop by a worker.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    /// Identifier the fetch was issued for.
    pub id: NodeId,
    /// App generation the fetch was spawned under; outcomes from an earlier
    /// generation are dropped by the shell (the old tree no longer exists).
    pub generation: u64,
    /// The loader's result.
    pub result: Result<Vec<T>, LoadError>,
}

/// Handle a user toggle on `item`.
///
/// The toggle always takes visual effect immediately. A fetch is warranted
/// iff the toggle opens the node AND it has no cached children AND no fetch
/// is already in flight — in that case the returned snapshot also carries
/// the loading mark and a [`FetchRequest`] is returned for the shell to
/// execute. Non-branch items are a complete no-op.
pub fn handle_toggle<T: TreeItem + Clone>(
    state: &TreeState<T>,
    item: &T,
) -> (TreeState<T>, Option<FetchRequest>) {
    if !item.is_branch() {
        return (state.clone(), None);
    }

    let id = item.id();
    let opening = !state.is_expanded(id);
    let needs_fetch = opening && !state.has_children(id) && !state.is_loading(id);

    let next = state.toggle_expanded(id);
    if needs_fetch {
        let next = next.start_loading(id);
        (next, Some(FetchRequest { id: id.clone() }))
    } else {
        (next, None)
    }
}

/// Handle a retry request on `item` after a visible error.
///
/// Guarded while a fetch for the same node is already in flight: retrying
/// then is a no-op, preserving the at-most-one-in-flight invariant.
/// Otherwise the loading mark is applied (clearing the error) and a request
/// is returned unconditionally.
pub fn handle_retry<T: TreeItem + Clone>(
    state: &TreeState<T>,
    item: &T,
) -> (TreeState<T>, Option<FetchRequest>) {
    if !item.is_branch() {
        return (state.clone(), None);
    }

    let id = item.id();
    if state.is_loading(id) {
        return (state.clone(), None);
    }

    let next = state.start_loading(id);
    (next, Some(FetchRequest { id: id.clone() }))
}

/// Commit a settled fetch into the next snapshot.
///
/// Success caches the children; failure records the error's display message,
/// falling back to a generic string when the message is empty. Exactly one
/// of the two applies per outcome, and both are terminal for that fetch.
/// Commits apply in completion order; per-id isolation comes from the keyed
/// maps in [`TreeState`].
pub fn commit_outcome<T: Clone>(state: &TreeState<T>, outcome: FetchOutcome<T>) -> TreeState<T> {
    match outcome.result {
        Ok(children) => state.finish_success(&outcome.id, children),
        Err(err) => {
            let message = if err.message.is_empty() {
                GENERIC_FETCH_FAILURE.to_string()
            } else {
                err.message
            };
            state.finish_error(&outcome.id, message)
        }
    }
}
