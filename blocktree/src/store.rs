//! Editor store contract and the in-memory document store.
//!
//! The tree never edits blocks itself. It resolves user intent into a
//! [`StoreCommand`] and hands it to whatever implements [`EditorStore`]; the
//! store owns the document and the selected-block id. [`DocumentStore`] is
//! the in-memory implementation used by the CLI and tests.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::block::{Block, BlockId, BlockKind};
use crate::catalog;

/// Errors produced when a store command cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No block with this id exists in the document.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// The document root cannot be moved, duplicated, or deleted.
    #[error("the root block cannot be {0}")]
    RootImmutable(&'static str),

    /// The target block's type does not hold children.
    #[error("block {0} cannot contain children")]
    NotAContainer(BlockId),

    /// Insert position is past the end of the parent's children.
    #[error("index {index} out of range for {parent_id} ({len} children)")]
    InvalidIndex { parent_id: BlockId, index: usize, len: usize },

    /// The move would place a block inside its own subtree.
    #[error("cannot move {block_id} into its own subtree ({parent_id})")]
    Cycle { block_id: BlockId, parent_id: BlockId },
}

/// An interaction wired between blocks (e.g. "on click, open modal").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    /// Block whose event fires the interaction.
    pub trigger_block_id: BlockId,
    /// Block the action applies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_block_id: Option<BlockId>,
    /// Trigger event name (`click`, `submit`, ...).
    pub event: String,
    /// Action name (`show`, `hide`, `navigate`, ...).
    pub action: String,
}

impl Interaction {
    /// Whether this interaction names `id` as trigger or target.
    #[must_use]
    pub fn references(&self, id: &str) -> bool {
        self.trigger_block_id == id || self.target_block_id.as_deref() == Some(id)
    }
}

/// A mutation the tree asks the store to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum StoreCommand {
    /// Insert a new block of `kind` under `parent_id`; `index` of `None` appends.
    #[serde(rename_all = "camelCase")]
    Add { parent_id: BlockId, kind: BlockKind, index: Option<usize> },
    /// Move a block to `index` within `parent_id`. `index` is the slot as seen
    /// before the block is removed from its old position.
    #[serde(rename_all = "camelCase")]
    Move { block_id: BlockId, parent_id: BlockId, index: usize },
    /// Move a block into a container that currently has no children.
    #[serde(rename_all = "camelCase")]
    MoveIntoEmpty { block_id: BlockId, parent_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Rename { block_id: BlockId, name: String },
    /// Insert a deep copy right after the original.
    #[serde(rename_all = "camelCase")]
    Duplicate { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Delete { block_id: BlockId },
}

/// The store contract the tree consumes.
pub trait EditorStore {
    /// Document root.
    fn root(&self) -> &Block;

    /// Look up a block by id.
    fn block(&self, id: &str) -> Option<&Block> {
        self.root().find(id)
    }

    /// Parent of a block. `None` for the root and unknown ids.
    fn parent_of(&self, id: &str) -> Option<&Block> {
        self.root().parent_of(id).map(|(parent, _)| parent)
    }

    /// Interactions whose trigger or target is `id`.
    fn interactions_for(&self, id: &str) -> Vec<&Interaction>;

    fn selected_block_id(&self) -> Option<&str>;

    fn set_selected_block_id(&mut self, id: Option<BlockId>);

    /// Apply a mutation. Returns the id of the block it created or touched.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] when the command references unknown blocks,
    /// targets the root, uses an out-of-range index, or would create a cycle.
    fn apply(&mut self, command: &StoreCommand) -> Result<BlockId, TreeError>;
}

/// In-memory editor store holding one page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStore {
    root: Block,
    #[serde(default)]
    interactions: Vec<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_block_id: Option<BlockId>,
}

impl DocumentStore {
    #[must_use]
    pub fn new(root: Block) -> Self {
        Self { root, interactions: Vec::new(), selected_block_id: None }
    }

    #[must_use]
    pub fn with_interactions(mut self, interactions: Vec<Interaction>) -> Self {
        self.interactions = interactions;
        self
    }

    /// Consume the store, returning the document root.
    #[must_use]
    pub fn into_root(self) -> Block {
        self.root
    }

    fn require(&self, id: &str) -> Result<&Block, TreeError> {
        self.root
            .find(id)
            .ok_or_else(|| TreeError::BlockNotFound(id.to_owned()))
    }

    fn container_mut(&mut self, id: &str) -> Result<&mut Block, TreeError> {
        let block = self
            .root
            .find_mut(id)
            .ok_or_else(|| TreeError::BlockNotFound(id.to_owned()))?;
        if !block.kind.permits_children() {
            return Err(TreeError::NotAContainer(id.to_owned()));
        }
        Ok(block)
    }

    /// Remove a non-root block from its parent, returning it and its old position.
    fn detach(&mut self, id: &str, verb: &'static str) -> Result<(Block, BlockId, usize), TreeError> {
        if self.root.id == id {
            return Err(TreeError::RootImmutable(verb));
        }
        let (parent_id, index) = self
            .root
            .parent_of(id)
            .map(|(parent, index)| (parent.id.clone(), index))
            .ok_or_else(|| TreeError::BlockNotFound(id.to_owned()))?;
        let parent = self
            .root
            .find_mut(&parent_id)
            .ok_or_else(|| TreeError::BlockNotFound(parent_id.clone()))?;
        let block = parent.children.remove(index);
        Ok((block, parent_id, index))
    }

    fn add(&mut self, parent_id: &str, kind: &BlockKind, index: Option<usize>) -> Result<BlockId, TreeError> {
        let parent = self.container_mut(parent_id)?;
        let len = parent.children.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(TreeError::InvalidIndex { parent_id: parent_id.to_owned(), index, len });
        }
        let id = Uuid::new_v4().to_string();
        let name = catalog::entry(kind).label;
        parent.children.insert(index, Block::new(id.clone(), kind.clone(), name));
        Ok(id)
    }

    fn move_block(&mut self, block_id: &str, parent_id: &str, index: usize) -> Result<BlockId, TreeError> {
        if self.root.id == block_id {
            return Err(TreeError::RootImmutable("moved"));
        }
        let moving = self.require(block_id)?;
        if moving.contains(parent_id) {
            return Err(TreeError::Cycle { block_id: block_id.to_owned(), parent_id: parent_id.to_owned() });
        }
        let target = self.require(parent_id)?;
        if !target.kind.permits_children() {
            return Err(TreeError::NotAContainer(parent_id.to_owned()));
        }
        let len = target.children.len();
        if index > len {
            return Err(TreeError::InvalidIndex { parent_id: parent_id.to_owned(), index, len });
        }

        let (block, old_parent, old_index) = self.detach(block_id, "moved")?;
        let adjusted = if old_parent == parent_id && old_index < index { index - 1 } else { index };
        let parent = self.container_mut(parent_id)?;
        parent.children.insert(adjusted, block);
        Ok(block_id.to_owned())
    }

    fn move_into_empty(&mut self, block_id: &str, parent_id: &str) -> Result<BlockId, TreeError> {
        let end = self.require(parent_id)?.children.len();
        self.move_block(block_id, parent_id, end)
    }

    fn rename(&mut self, block_id: &str, name: &str) -> Result<BlockId, TreeError> {
        let block = self
            .root
            .find_mut(block_id)
            .ok_or_else(|| TreeError::BlockNotFound(block_id.to_owned()))?;
        name.clone_into(&mut block.name);
        Ok(block_id.to_owned())
    }

    fn duplicate(&mut self, block_id: &str) -> Result<BlockId, TreeError> {
        if self.root.id == block_id {
            return Err(TreeError::RootImmutable("duplicated"));
        }
        let (parent_id, index) = self
            .root
            .parent_of(block_id)
            .map(|(parent, index)| (parent.id.clone(), index))
            .ok_or_else(|| TreeError::BlockNotFound(block_id.to_owned()))?;
        let copy = self.require(block_id)?.duplicate();
        let id = copy.id.clone();
        let parent = self
            .root
            .find_mut(&parent_id)
            .ok_or_else(|| TreeError::BlockNotFound(parent_id.clone()))?;
        parent.children.insert(index + 1, copy);
        Ok(id)
    }

    fn delete(&mut self, block_id: &str) -> Result<BlockId, TreeError> {
        let (removed, _, _) = self.detach(block_id, "deleted")?;
        let gone = removed.subtree_ids();
        if self
            .selected_block_id
            .as_ref()
            .is_some_and(|selected| gone.contains(selected))
        {
            self.selected_block_id = None;
        }
        self.interactions
            .retain(|interaction| !gone.iter().any(|id| interaction.references(id)));
        Ok(block_id.to_owned())
    }
}

impl EditorStore for DocumentStore {
    fn root(&self) -> &Block {
        &self.root
    }

    fn interactions_for(&self, id: &str) -> Vec<&Interaction> {
        self.interactions
            .iter()
            .filter(|interaction| interaction.references(id))
            .collect()
    }

    fn selected_block_id(&self) -> Option<&str> {
        self.selected_block_id.as_deref()
    }

    fn set_selected_block_id(&mut self, id: Option<BlockId>) {
        self.selected_block_id = id;
    }

    fn apply(&mut self, command: &StoreCommand) -> Result<BlockId, TreeError> {
        debug!(?command, "applying store command");
        match command {
            StoreCommand::Add { parent_id, kind, index } => self.add(parent_id, kind, *index),
            StoreCommand::Move { block_id, parent_id, index } => self.move_block(block_id, parent_id, *index),
            StoreCommand::MoveIntoEmpty { block_id, parent_id } => self.move_into_empty(block_id, parent_id),
            StoreCommand::Rename { block_id, name } => self.rename(block_id, name),
            StoreCommand::Duplicate { block_id } => self.duplicate(block_id),
            StoreCommand::Delete { block_id } => self.delete(block_id),
        }
    }
}
