//! Tree items and the projections the core state machine needs from them.
//!
//! The expansion state machine is generic over the item type: it only ever
//! asks for an item's identifier and whether the item can have children.
//! `FsItem` is the concrete fake-filesystem item this application explores.

use crate::model::format::format_bytes;
use crate::model::identifiers::NodeId;

/// The projections the core requires from an item.
///
/// Implementors promise that `id` is unique per item and stable across
/// repeated fetches of the same parent. The core interprets nothing else
/// about item content.
pub trait TreeItem {
    /// Stable, unique identifier of this item.
    fn id(&self) -> &NodeId;

    /// Whether this item can have children (branch vs leaf).
    fn is_branch(&self) -> bool;
}

/// File kind for leaf items, driving the icon glyph and size distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Word-processor document.
    Doc,
    /// PNG image.
    Png,
    /// PDF document.
    Pdf,
    /// MP3 audio.
    Mp3,
    /// MP4 video.
    Mp4,
    /// ZIP archive.
    Zip,
    /// Plain text.
    Txt,
    /// TSX source file.
    Tsx,
    /// JSON data.
    Json,
}

impl FileKind {
    /// All kinds, in a stable order. Used by the fake server when picking.
    pub const ALL: [FileKind; 9] = [
        FileKind::Doc,
        FileKind::Png,
        FileKind::Pdf,
        FileKind::Mp3,
        FileKind::Mp4,
        FileKind::Zip,
        FileKind::Txt,
        FileKind::Tsx,
        FileKind::Json,
    ];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Doc => "doc",
            FileKind::Png => "png",
            FileKind::Pdf => "pdf",
            FileKind::Mp3 => "mp3",
            FileKind::Mp4 => "mp4",
            FileKind::Zip => "zip",
            FileKind::Txt => "txt",
            FileKind::Tsx => "tsx",
            FileKind::Json => "json",
        }
    }

    /// Single-width glyph for the icon column.
    pub fn glyph(self) -> &'static str {
        match self {
            FileKind::Doc | FileKind::Txt => "≡",
            FileKind::Png => "◩",
            FileKind::Pdf => "□",
            FileKind::Mp3 => "♪",
            FileKind::Mp4 => "▶",
            FileKind::Zip => "◫",
            FileKind::Tsx | FileKind::Json => "{",
        }
    }
}

/// An item in the fake filesystem: a folder (branch) or a file (leaf).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsItem {
    /// A folder. Always a branch; children are fetched lazily on expansion.
    Folder {
        /// Stable identifier.
        id: NodeId,
        /// Display name.
        name: String,
    },
    /// A file. Never has children.
    File {
        /// Stable identifier.
        id: NodeId,
        /// Display name, including extension.
        name: String,
        /// File kind.
        kind: FileKind,
        /// Size in bytes.
        size_bytes: u64,
    },
}

impl FsItem {
    /// Display label (the item name).
    pub fn label(&self) -> &str {
        match self {
            FsItem::Folder { name, .. } => name,
            FsItem::File { name, .. } => name,
        }
    }

    /// Optional secondary display text: a human-readable size for files.
    pub fn secondary(&self) -> Option<String> {
        match self {
            FsItem::Folder { .. } => None,
            FsItem::File { size_bytes, .. } => Some(format_bytes(*size_bytes)),
        }
    }

    /// Icon glyph for the row's icon column.
    pub fn glyph(&self) -> &'static str {
        match self {
            FsItem::Folder { .. } => "▤",
            FsItem::File { kind, .. } => kind.glyph(),
        }
    }
}

impl TreeItem for FsItem {
    fn id(&self) -> &NodeId {
        match self {
            FsItem::Folder { id, .. } => id,
            FsItem::File { id, .. } => id,
        }
    }

    fn is_branch(&self) -> bool {
        matches!(self, FsItem::Folder { .. })
    }
}
