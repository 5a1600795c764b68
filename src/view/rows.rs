//! Flattening the tree into visible rows.
//!
//! The tree is never materialized as a nested structure: rendering walks the
//! root items recursively, driven only by the `expanded` set and the
//! children cache, and produces a flat list of rows the pane can draw and
//! the cursor can move over. Each level is a pure function of
//! (items-at-this-level, state, depth); depth feeds indentation and nothing
//! else.

use crate::model::{FsItem, NodeId, TreeItem};
use crate::state::TreeState;

/// Number of skeleton rows drawn under a branch while its fetch is in
/// flight.
pub const LOADING_PLACEHOLDER_ROWS: usize = 3;

/// One visible row of the explorer.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// Nesting depth, 0 for root items. Drives indentation only.
    pub depth: usize,
    /// What the row shows.
    pub kind: RowKind<'a>,
}

/// Row content variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind<'a> {
    /// A tree item (folder or file).
    Item {
        /// The item itself.
        item: &'a FsItem,
        /// Whether this branch is toggled open.
        expanded: bool,
        /// Whether a child fetch for this branch is in flight.
        loading: bool,
    },
    /// Dimmed skeleton row under a branch whose fetch is in flight.
    Placeholder,
    /// Inline failure row under a branch whose last fetch failed.
    Error {
        /// The branch the failed fetch belongs to; retry targets this id.
        parent: &'a NodeId,
        /// Failure message to display.
        message: &'a str,
    },
}

/// Flatten the currently visible tree into rows.
pub fn visible_rows<'a>(items: &'a [FsItem], tree: &'a TreeState<FsItem>) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    push_level(items, tree, 0, &mut rows);
    rows
}

fn push_level<'a>(
    items: &'a [FsItem],
    tree: &'a TreeState<FsItem>,
    depth: usize,
    rows: &mut Vec<Row<'a>>,
) {
    for item in items {
        let id = item.id();
        let branch = item.is_branch();
        let expanded = branch && tree.is_expanded(id);
        let loading = tree.is_loading(id);
        rows.push(Row {
            depth,
            kind: RowKind::Item {
                item,
                expanded,
                loading,
            },
        });

        if !expanded {
            continue;
        }
        // Same precedence as the per-node state machine: an in-flight fetch
        // shows skeletons even if a stale error existed (it cannot; starting
        // the fetch cleared it), then errors, then cached children.
        if loading {
            for _ in 0..LOADING_PLACEHOLDER_ROWS {
                rows.push(Row {
                    depth: depth + 1,
                    kind: RowKind::Placeholder,
                });
            }
        } else if let Some(message) = tree.error(id) {
            rows.push(Row {
                depth: depth + 1,
                kind: RowKind::Error {
                    parent: id,
                    message,
                },
            });
        } else if let Some(children) = tree.children(id) {
            push_level(children, tree, depth + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileKind;

    fn id(raw: &str) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    fn folder(raw: &str) -> FsItem {
        FsItem::Folder {
            id: id(raw),
            name: raw.rsplit('/').next().unwrap_or(raw).to_string(),
        }
    }

    fn file(raw: &str) -> FsItem {
        FsItem::File {
            id: id(raw),
            name: raw.rsplit('/').next().unwrap_or(raw).to_string(),
            kind: FileKind::Txt,
            size_bytes: 1,
        }
    }

    fn labels(rows: &[Row<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| match &row.kind {
                RowKind::Item { item, .. } => format!("{}:{}", row.depth, item.label()),
                RowKind::Placeholder => format!("{}:<skeleton>", row.depth),
                RowKind::Error { message, .. } => format!("{}:<error {message}>", row.depth),
            })
            .collect()
    }

    #[test]
    fn collapsed_tree_is_just_the_root_level() {
        let items = vec![folder("root/a"), file("root/b.txt")];
        let tree = TreeState::new();
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a", "0:b.txt"]);
    }

    #[test]
    fn expanded_loading_branch_shows_three_skeletons() {
        let items = vec![folder("root/a")];
        let a = id("root/a");
        let tree = TreeState::new().toggle_expanded(&a).start_loading(&a);
        let rows = visible_rows(&items, &tree);
        assert_eq!(
            labels(&rows),
            ["0:a", "1:<skeleton>", "1:<skeleton>", "1:<skeleton>"]
        );
    }

    #[test]
    fn expanded_failed_branch_shows_error_row() {
        let items = vec![folder("root/a"), folder("root/b")];
        let a = id("root/a");
        let tree = TreeState::new().toggle_expanded(&a).finish_error(&a, "boom");
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a", "1:<error boom>", "0:b"]);
        match &rows[1].kind {
            RowKind::Error { parent, .. } => assert_eq!(*parent, &a),
            other => panic!("expected error row, got {other:?}"),
        }
    }

    #[test]
    fn expanded_cached_branch_recurses() {
        let items = vec![folder("root/a")];
        let a = id("root/a");
        let tree = TreeState::new()
            .toggle_expanded(&a)
            .finish_success(&a, vec![folder("root/a/x"), file("root/a/y.txt")]);
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a", "1:x", "1:y.txt"]);
    }

    #[test]
    fn nested_expansion_recurses_to_any_depth() {
        let items = vec![folder("root/a")];
        let a = id("root/a");
        let ax = id("root/a/x");
        let tree = TreeState::new()
            .toggle_expanded(&a)
            .finish_success(&a, vec![folder("root/a/x")])
            .toggle_expanded(&ax)
            .finish_success(&ax, vec![file("root/a/x/deep.txt")]);
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a", "1:x", "2:deep.txt"]);
    }

    #[test]
    fn collapsed_branch_hides_children_but_keeps_cache_invisible() {
        let items = vec![folder("root/a")];
        let a = id("root/a");
        let tree = TreeState::new()
            .toggle_expanded(&a)
            .finish_success(&a, vec![file("root/a/y.txt")])
            .toggle_expanded(&a);
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a"]);
    }

    #[test]
    fn parked_error_on_collapsed_branch_is_invisible() {
        let items = vec![folder("root/a")];
        let a = id("root/a");
        let tree = TreeState::new().finish_error(&a, "boom"); // never expanded
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a"]);
    }

    #[test]
    fn expanded_branch_with_empty_cached_listing_shows_nothing_below() {
        let items = vec![folder("root/a"), file("root/b.txt")];
        let a = id("root/a");
        let tree = TreeState::new().toggle_expanded(&a).finish_success(&a, Vec::new());
        let rows = visible_rows(&items, &tree);
        assert_eq!(labels(&rows), ["0:a", "0:b.txt"]);
    }
}
