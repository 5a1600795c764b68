//! Unit tests for AppState transitions.

use crate::model::{FsItem, NodeId};
use crate::state::{AppState, RootLoad, TreeState};

fn folder(raw: &str) -> FsItem {
    FsItem::Folder {
        id: NodeId::new(raw).unwrap(),
        name: raw.to_string(),
    }
}

#[test]
fn new_state_is_loading_root_with_empty_tree() {
    let state = AppState::new();
    assert_eq!(state.root, RootLoad::Loading);
    assert!(state.tree.is_empty());
    assert_eq!(state.cursor, 0);
    assert_eq!(state.generation, 0);
}

#[test]
fn settle_root_ok_exposes_items() {
    let mut state = AppState::new();
    state.settle_root_ok(vec![folder("root/a")]);
    assert_eq!(state.root_items().map(<[FsItem]>::len), Some(1));
}

#[test]
fn settle_root_err_exposes_message() {
    let mut state = AppState::new();
    state.settle_root_err("no backend".to_string());
    assert_eq!(state.root, RootLoad::Failed("no backend".to_string()));
    assert!(state.root_items().is_none());
}

#[test]
fn reload_root_discards_everything_and_bumps_generation() {
    let mut state = AppState::new();
    state.settle_root_ok(vec![folder("root/a")]);
    let a = NodeId::new("root/a").unwrap();
    state.tree = state
        .tree
        .toggle_expanded(&a)
        .finish_success(&a, vec![folder("root/a/x")])
        .finish_error(&NodeId::new("root/b").unwrap(), "boom");
    state.cursor = 3;
    state.scroll = 1;

    state.reload_root();

    assert_eq!(state.root, RootLoad::Loading);
    assert_eq!(state.tree, TreeState::new(), "post-reload tree equals a fresh one");
    assert_eq!(state.cursor, 0);
    assert_eq!(state.scroll, 0);
    assert_eq!(state.generation, 1);
}

#[test]
fn cursor_movement_clamps_to_row_count() {
    let mut state = AppState::new();
    state.cursor_down(3);
    state.cursor_down(3);
    state.cursor_down(3);
    assert_eq!(state.cursor, 2, "cursor stops at the last row");

    state.cursor_up();
    assert_eq!(state.cursor, 1);

    state.cursor_top();
    assert_eq!(state.cursor, 0);
    state.cursor_up();
    assert_eq!(state.cursor, 0, "cursor does not move above the first row");

    state.cursor_bottom(5);
    assert_eq!(state.cursor, 4);
    state.cursor_bottom(0);
    assert_eq!(state.cursor, 0);
}

#[test]
fn clamp_cursor_after_rows_shrink() {
    let mut state = AppState::new();
    state.cursor = 9;
    state.clamp_cursor(4);
    assert_eq!(state.cursor, 3);
    state.clamp_cursor(0);
    assert_eq!(state.cursor, 0);
}

#[test]
fn ensure_cursor_visible_scrolls_both_directions() {
    let mut state = AppState::new();
    state.cursor = 12;
    state.ensure_cursor_visible(10);
    assert_eq!(state.scroll, 3, "scrolls down so cursor is the last visible row");

    state.cursor = 1;
    state.ensure_cursor_visible(10);
    assert_eq!(state.scroll, 1, "scrolls up to the cursor");

    state.ensure_cursor_visible(0); // degenerate viewport is a no-op
    assert_eq!(state.scroll, 1);
}
