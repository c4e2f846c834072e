//! Tree-wide interaction state: expansion set, drag slot, rename slot.
//!
//! One `TreeState` exists per rendered tree and is owned by the root
//! [`crate::engine::TreeEngine`]. Because the drag and rename slots are single
//! `Option`s on that owner, at most one block can be dragging and at most one
//! can be renaming; starting a new drag or rename overwrites the slot.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};

/// Where a drag began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSource {
    pub parent_id: BlockId,
    pub index: usize,
    pub block_id: BlockId,
}

/// The currently hovered destination of a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DropTarget {
    /// Child slot `index` of `parent_id`.
    #[serde(rename_all = "camelCase")]
    Slot { parent_id: BlockId, index: usize },
    /// Drop zone of a container with no children.
    #[serde(rename_all = "camelCase")]
    EmptyParent { parent_id: BlockId },
}

/// An active drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    pub target: Option<DropTarget>,
}

/// Interaction state shared by every node of one tree.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    expanded: HashSet<BlockId>,
    drag: Option<DragState>,
    renaming: Option<BlockId>,
}

impl TreeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Expansion ---

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_owned());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Flip the expansion of `id`. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_owned());
            true
        }
    }

    /// Expand every expandable block in the subtree.
    pub fn expand_all(&mut self, root: &Block) {
        if root.can_expand() {
            self.expanded.insert(root.id.clone());
        }
        for child in &root.children {
            self.expand_all(child);
        }
    }

    #[must_use]
    pub fn expanded(&self) -> &HashSet<BlockId> {
        &self.expanded
    }

    // --- Drag ---

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Begin a drag, replacing any drag already in progress.
    pub fn start_drag(&mut self, source: DragSource) {
        self.drag = Some(DragState { source, target: None });
    }

    /// Set the hovered drop target. Ignored when no drag is active.
    pub fn set_drop_target(&mut self, target: DropTarget) {
        if let Some(drag) = self.drag.as_mut() {
            drag.target = Some(target);
        }
    }

    /// Clear the hovered target, but only if it is still `target`.
    pub fn clear_drop_target(&mut self, target: &DropTarget) {
        if let Some(drag) = self.drag.as_mut() {
            if drag.target.as_ref() == Some(target) {
                drag.target = None;
            }
        }
    }

    /// End the drag, returning it.
    pub fn take_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    #[must_use]
    pub fn is_drag_source(&self, id: &str) -> bool {
        self.drag.as_ref().is_some_and(|drag| drag.source.block_id == id)
    }

    #[must_use]
    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drag.as_ref().and_then(|drag| drag.target.as_ref())
    }

    // --- Rename ---

    #[must_use]
    pub fn renaming(&self) -> Option<&str> {
        self.renaming.as_deref()
    }

    #[must_use]
    pub fn is_renaming(&self, id: &str) -> bool {
        self.renaming.as_deref() == Some(id)
    }

    /// Start renaming `id`. Any other rename in progress ends uncommitted.
    pub fn start_rename(&mut self, id: &str) {
        self.renaming = Some(id.to_owned());
    }

    /// End the rename of `id`. Returns `false` if `id` was not the active rename.
    pub fn end_rename(&mut self, id: &str) -> bool {
        if self.is_renaming(id) {
            self.renaming = None;
            true
        } else {
            false
        }
    }
}
