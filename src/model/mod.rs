//! Domain model types.
//!
//! Pure data: node identifiers, tree items, the error taxonomy, key actions,
//! and display formatting helpers. Nothing in this module performs I/O.

pub mod error;
pub mod format;
pub mod identifiers;
pub mod item;
pub mod key_action;

pub use error::{AppError, LoadError};
pub use format::format_bytes;
pub use identifiers::{InvalidNodeId, NodeId};
pub use item::{FileKind, FsItem, TreeItem};
pub use key_action::KeyAction;
