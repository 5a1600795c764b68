//! Root application state and transitions.
//!
//! `AppState` is the single piece of mutable shared state, owned exclusively
//! by the event loop and mutated only through the transitions here and in
//! [`crate::state::expansion`]. Pure data, no side effects.

use crate::model::FsItem;
use crate::state::TreeState;

/// Observable states of the root-items load.
///
/// The root listing has its own instance of the child-fetch failure kind,
/// handled by the enclosing view rather than [`TreeState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLoad {
    /// Root fetch in flight; render a full-pane loading message.
    Loading,
    /// Root fetch failed; render the message and a reload hint.
    Failed(String),
    /// Root items available; render the tree.
    Ready(Vec<FsItem>),
}

/// Application state: root load, tree expansion state, cursor, overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// State of the top-level listing fetch.
    pub root: RootLoad,
    /// Per-node expansion/fetch state for the whole tree.
    pub tree: TreeState<FsItem>,
    /// Cursor index into the flattened visible rows.
    pub cursor: usize,
    /// First visible row index (vertical scroll offset).
    pub scroll: usize,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Remount generation. Bumped by [`AppState::reload_root`]; fetch
    /// outcomes stamped with an older generation are dropped by the shell,
    /// so workers from a discarded tree cannot write into the new one.
    pub generation: u64,
}

impl AppState {
    /// Fresh state at mount: root loading, empty tree, cursor at the top.
    pub fn new() -> Self {
        Self {
            root: RootLoad::Loading,
            tree: TreeState::new(),
            cursor: 0,
            scroll: 0,
            help_visible: false,
            generation: 0,
        }
    }

    /// Commit a successful root fetch.
    pub fn settle_root_ok(&mut self, items: Vec<FsItem>) {
        self.root = RootLoad::Ready(items);
    }

    /// Commit a failed root fetch.
    pub fn settle_root_err(&mut self, message: String) {
        self.root = RootLoad::Failed(message);
    }

    /// Root items when the root load has settled successfully.
    pub fn root_items(&self) -> Option<&[FsItem]> {
        match &self.root {
            RootLoad::Ready(items) => Some(items),
            _ => None,
        }
    }

    /// Simulated remount: discard all expansion/loading/cache/error state,
    /// reset the cursor, and bump the generation. The post-reload tree is
    /// equivalent to a freshly constructed empty [`TreeState`].
    pub fn reload_root(&mut self) {
        self.root = RootLoad::Loading;
        self.tree = TreeState::new();
        self.cursor = 0;
        self.scroll = 0;
        self.generation += 1;
    }

    /// Move the cursor up one row.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row, clamped to `row_count`.
    pub fn cursor_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    /// Jump the cursor to the first row.
    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    /// Jump the cursor to the last row.
    pub fn cursor_bottom(&mut self, row_count: usize) {
        self.cursor = row_count.saturating_sub(1);
    }

    /// Clamp the cursor after the row list shrank (collapse, reload).
    pub fn clamp_cursor(&mut self, row_count: usize) {
        if row_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= row_count {
            self.cursor = row_count - 1;
        }
    }

    /// Adjust the scroll offset so the cursor stays inside a viewport of
    /// `height` rows.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
