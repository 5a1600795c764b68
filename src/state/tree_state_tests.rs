//! Unit tests for TreeState pure transitions.
//!
//! Verifies the transition postconditions and the independence invariants:
//! per-id isolation, error clearing on fetch start, cache permanence, and
//! toggle purity.

use crate::model::{FsItem, NodeId};
use crate::state::TreeState;

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).unwrap()
}

fn folder(raw: &str) -> FsItem {
    FsItem::Folder {
        id: id(raw),
        name: raw.rsplit('/').next().unwrap_or(raw).to_string(),
    }
}

#[test]
fn new_state_is_empty() {
    let state: TreeState<FsItem> = TreeState::new();
    assert!(state.is_empty());
    assert!(!state.is_expanded(&id("root/a")));
    assert!(!state.is_loading(&id("root/a")));
    assert!(state.children(&id("root/a")).is_none());
    assert!(state.error(&id("root/a")).is_none());
}

#[test]
fn start_loading_adds_to_loading_and_clears_error() {
    let a = id("root/a");
    let state: TreeState<FsItem> = TreeState::new().finish_error(&a, "boom");
    assert_eq!(state.error(&a), Some("boom"));

    let next = state.start_loading(&a);
    assert!(next.is_loading(&a));
    assert!(next.error(&a).is_none(), "starting a fetch clears the prior error");

    // Input snapshot untouched.
    assert!(!state.is_loading(&a));
    assert_eq!(state.error(&a), Some("boom"));
}

#[test]
fn start_loading_is_idempotent() {
    let a = id("root/a");
    let once: TreeState<FsItem> = TreeState::new().start_loading(&a);
    let twice = once.start_loading(&a);
    assert_eq!(once, twice);
}

#[test]
fn start_loading_leaves_other_ids_untouched() {
    let a = id("root/a");
    let b = id("root/b");
    let state: TreeState<FsItem> = TreeState::new()
        .finish_success(&b, vec![folder("root/b/x")])
        .finish_error(&b, "old failure")
        .toggle_expanded(&b);

    let next = state.start_loading(&a);
    assert!(next.is_expanded(&b));
    assert_eq!(next.error(&b), Some("old failure"));
    assert_eq!(next.children(&b).map(<[FsItem]>::len), Some(1));
}

#[test]
fn finish_success_caches_children_and_stops_loading() {
    let a = id("root/a");
    let children = vec![folder("root/a/x"), folder("root/a/y")];
    let state: TreeState<FsItem> = TreeState::new().start_loading(&a);

    let next = state.finish_success(&a, children.clone());
    assert!(!next.is_loading(&a));
    assert_eq!(next.children(&a), Some(children.as_slice()));
    assert!(next.has_children(&a));
}

#[test]
fn finish_success_keeps_empty_listing_as_cache_entry() {
    let a = id("root/a");
    let state: TreeState<FsItem> = TreeState::new().start_loading(&a);
    let next = state.finish_success(&a, Vec::new());
    assert!(next.has_children(&a), "an empty listing still counts as cached");
    assert_eq!(next.children(&a), Some(&[][..]));
}

#[test]
fn finish_error_records_message_and_stops_loading() {
    let a = id("root/a");
    let state: TreeState<FsItem> = TreeState::new().start_loading(&a);

    let next = state.finish_error(&a, "boom");
    assert!(!next.is_loading(&a));
    assert_eq!(next.error(&a), Some("boom"));
}

#[test]
fn toggle_expanded_flips_membership() {
    let a = id("root/a");
    let state: TreeState<FsItem> = TreeState::new();

    let open = state.toggle_expanded(&a);
    assert!(open.is_expanded(&a));

    let closed = open.toggle_expanded(&a);
    assert!(!closed.is_expanded(&a));
}

#[test]
fn double_toggle_restores_original_state_exactly() {
    let a = id("root/a");
    let state: TreeState<FsItem> = TreeState::new()
        .finish_success(&a, vec![folder("root/a/x")])
        .finish_error(&a, "stale");

    let round_trip = state.toggle_expanded(&a).toggle_expanded(&a);
    assert_eq!(state, round_trip, "toggling alone touches nothing but expanded");
}

#[test]
fn collapsing_does_not_clear_cache_loading_or_error() {
    let a = id("root/a");
    let b = id("root/b");
    let state: TreeState<FsItem> = TreeState::new()
        .toggle_expanded(&a)
        .finish_success(&a, vec![folder("root/a/x")])
        .toggle_expanded(&b)
        .start_loading(&b);

    let collapsed = state.toggle_expanded(&a).toggle_expanded(&b);
    assert!(!collapsed.is_expanded(&a));
    assert!(collapsed.has_children(&a), "collapse keeps the cache");
    assert!(collapsed.is_loading(&b), "collapse keeps the loading flag");
}
