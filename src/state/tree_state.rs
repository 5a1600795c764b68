//! Per-node expansion/fetch state for the whole tree.
//!
//! One [`TreeState`] instance covers the entire tree; everything is keyed by
//! [`NodeId`]. Transitions are pure: each takes the current snapshot by
//! reference and returns a new snapshot, so the render path always observes
//! a fully-formed snapshot, never a partially-updated one.
//!
//! # Invariants
//!
//! - Starting a fetch clears any prior error for that id before the fetch
//!   settles, so `loading` never coexists with a stale error.
//! - `children_by_id` entries are never evicted: a node with cached children
//!   never triggers another fetch on later expand/collapse cycles.
//! - `expanded` membership is independent of the other three collections;
//!   collapsing a node clears nothing.

use crate::model::NodeId;
use std::collections::{HashMap, HashSet};

/// Immutable-update state container for the tree, generic over item type.
///
/// Cheap to clone relative to tree sizes this explorer renders; every
/// transition clones and returns the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState<T> {
    expanded: HashSet<NodeId>,
    loading: HashSet<NodeId>,
    children_by_id: HashMap<NodeId, Vec<T>>,
    error_by_id: HashMap<NodeId, String>,
}

impl<T> Default for TreeState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeState<T> {
    /// Create an empty state: nothing expanded, loading, cached, or failed.
    pub fn new() -> Self {
        Self {
            expanded: HashSet::new(),
            loading: HashSet::new(),
            children_by_id: HashMap::new(),
            error_by_id: HashMap::new(),
        }
    }

    /// Whether `id` is currently toggled open.
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Whether `id` has a child fetch in flight.
    pub fn is_loading(&self, id: &NodeId) -> bool {
        self.loading.contains(id)
    }

    /// Cached children for `id`, if a fetch has succeeded at least once.
    pub fn children(&self, id: &NodeId) -> Option<&[T]> {
        self.children_by_id.get(id).map(Vec::as_slice)
    }

    /// Whether `id` has a cached children entry (even an empty one).
    pub fn has_children(&self, id: &NodeId) -> bool {
        self.children_by_id.contains_key(id)
    }

    /// Last failure message for `id`, if its most recent fetch failed.
    pub fn error(&self, id: &NodeId) -> Option<&str> {
        self.error_by_id.get(id).map(String::as_str)
    }

    /// True when no node has any expansion, loading, cache, or error state.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
            && self.loading.is_empty()
            && self.children_by_id.is_empty()
            && self.error_by_id.is_empty()
    }
}

impl<T: Clone> TreeState<T> {
    /// Mark a fetch as started: adds `id` to `loading` and clears any prior
    /// error for `id`. Idempotent.
    #[must_use]
    pub fn start_loading(&self, id: &NodeId) -> Self {
        let mut next = self.clone();
        next.loading.insert(id.clone());
        next.error_by_id.remove(id);
        next
    }

    /// Commit a successful fetch: removes `id` from `loading` and caches the
    /// children. Does not touch `error_by_id`; `start_loading` already
    /// cleared it when the fetch began.
    #[must_use]
    pub fn finish_success(&self, id: &NodeId, children: Vec<T>) -> Self {
        let mut next = self.clone();
        next.loading.remove(id);
        next.children_by_id.insert(id.clone(), children);
        next
    }

    /// Commit a failed fetch: removes `id` from `loading` and records the
    /// failure message.
    #[must_use]
    pub fn finish_error(&self, id: &NodeId, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.loading.remove(id);
        next.error_by_id.insert(id.clone(), message.into());
        next
    }

    /// Flip `id`'s membership in `expanded`. Pure; never triggers I/O — the
    /// decision to fetch is computed by the expansion layer around this same
    /// toggle.
    #[must_use]
    pub fn toggle_expanded(&self, id: &NodeId) -> Self {
        let mut next = self.clone();
        if !next.expanded.remove(id) {
            next.expanded.insert(id.clone());
        }
        next
    }
}
