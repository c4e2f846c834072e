//! Gestures on a tree row, the node context they happen in, and the tree
//! events they become.
//!
//! A row knows its own position (`NodeContext`). When the user does something
//! on it (`Gesture`), the engine turns that into a `TreeEvent` carrying every
//! id the root handler needs, so nothing has to be looked up again while the
//! event bubbles up.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId, BlockKind};
use crate::consts::ROOT_DEPTH;
use crate::picker::InsertionMode;

/// A keyboard key as reported by the host (e.g. `"Enter"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Which side of a row the pointer is over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    /// The slot this row occupies.
    Before,
    /// The slot right after this row.
    After,
}

/// Raw user input on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Click on the expand/collapse chevron.
    ToggleClick,
    /// Click on the row body.
    Click,
    /// Right-click on the row.
    ContextMenu,
    /// Double-click on the row's name.
    DoubleClickName,
    DragStart,
    DragOver(SlotPosition),
    DragLeave(SlotPosition),
    Drop(SlotPosition),
    DragEnd,
    /// Drag over the drop zone of an empty container.
    DragOverEmpty,
    DragLeaveEmpty,
    DropOnEmpty,
    /// Key pressed in the rename input; `value` is the input's live text.
    RenameKey { key: Key, value: String },
    /// The rename input lost focus.
    RenameBlur { value: String },
    /// A block type chosen from this row's insertion picker.
    PickBlockType { kind: BlockKind, index: Option<usize> },
    DuplicateClick,
    DeleteClick,
}

/// Position of one rendered block within the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    pub block_id: BlockId,
    pub kind: BlockKind,
    /// `None` only for the document root.
    pub parent_id: Option<BlockId>,
    /// Index within the parent's children.
    pub index: usize,
    pub depth: usize,
    pub has_children: bool,
    /// Picker mode for blocks inserted as children of this one.
    pub child_mode: InsertionMode,
}

impl NodeContext {
    /// Context for the document root.
    #[must_use]
    pub fn root(block: &Block) -> Self {
        Self {
            block_id: block.id.clone(),
            kind: block.kind.clone(),
            parent_id: None,
            index: 0,
            depth: ROOT_DEPTH,
            has_children: block.has_children(),
            child_mode: InsertionMode::for_children_of(&block.kind, InsertionMode::Nested),
        }
    }

    /// Context for `child`, the `index`-th child of the block this context describes.
    #[must_use]
    pub fn child(&self, child: &Block, index: usize) -> Self {
        Self {
            block_id: child.id.clone(),
            kind: child.kind.clone(),
            parent_id: Some(self.block_id.clone()),
            index,
            depth: self.depth + 1,
            has_children: child.has_children(),
            child_mode: InsertionMode::for_children_of(&child.kind, self.child_mode),
        }
    }

    /// Resolve the context of `id` by walking down from `root`.
    #[must_use]
    pub fn resolve(root: &Block, id: &str) -> Option<Self> {
        let path = root.path_to(id)?;
        let mut ctx = Self::root(root);
        for pair in path.windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            let index = parent.children.iter().position(|c| c.id == child.id)?;
            ctx = ctx.child(child, index);
        }
        Some(ctx)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Expand/collapse is offered when the type holds children or already has some.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.kind.permits_children() || self.has_children
    }
}

/// An event emitted by a node and bubbled, unchanged, to the tree root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TreeEvent {
    #[serde(rename_all = "camelCase")]
    ToggleExpansion { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    ContextMenu { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    DragStart { parent_id: BlockId, index: usize, block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    DragOver { parent_id: BlockId, index: usize },
    #[serde(rename_all = "camelCase")]
    DragLeave { parent_id: BlockId, index: usize },
    #[serde(rename_all = "camelCase")]
    Drop { parent_id: BlockId, index: usize },
    DragEnd,
    #[serde(rename_all = "camelCase")]
    EmptyDragOver { parent_id: BlockId },
    #[serde(rename_all = "camelCase")]
    EmptyDragLeave { parent_id: BlockId },
    #[serde(rename_all = "camelCase")]
    EmptyDrop { parent_id: BlockId },
    #[serde(rename_all = "camelCase")]
    AddChild { parent_id: BlockId, block_type: BlockKind },
    #[serde(rename_all = "camelCase")]
    AddChildAtPosition { parent_id: BlockId, block_type: BlockKind, index: usize },
    #[serde(rename_all = "camelCase")]
    StartRename { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    FinishRename { block_id: BlockId, name: String },
    #[serde(rename_all = "camelCase")]
    CancelRename { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Select { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Duplicate { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Delete { block_id: BlockId },
}
