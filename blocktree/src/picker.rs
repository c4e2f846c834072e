//! Insertion picker: which block types can be added where.
//!
//! The picker mode is positional. Anything added under a form (at any depth)
//! is a form field; anything added under a canvas is a content element; all
//! other containers take generic nested blocks. Form wins over canvas when a
//! canvas sits inside a form.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId, BlockKind};

/// What kind of insertion picker a container shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionMode {
    /// Inside a form subtree.
    FormField,
    /// Inside a canvas block.
    ContentElement,
    /// Anywhere else.
    #[default]
    Nested,
}

impl InsertionMode {
    /// Mode for children of `kind`, given the mode its own parent handed down.
    #[must_use]
    pub fn for_children_of(kind: &BlockKind, inherited: InsertionMode) -> InsertionMode {
        match (inherited, kind) {
            (InsertionMode::FormField, _) | (_, BlockKind::Form) => InsertionMode::FormField,
            (InsertionMode::ContentElement, _) | (_, BlockKind::Canvas) => InsertionMode::ContentElement,
            _ => InsertionMode::Nested,
        }
    }

    /// Mode for children of the last block in `path` (root first).
    #[must_use]
    pub fn for_path(path: &[&Block]) -> InsertionMode {
        path.iter()
            .fold(InsertionMode::Nested, |mode, block| Self::for_children_of(&block.kind, mode))
    }

    /// Button label for the picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FormField => "Add field",
            Self::ContentElement => "Add element",
            Self::Nested => "Add block",
        }
    }

    /// Block types the picker offers in this mode.
    #[must_use]
    pub fn offered_kinds(self) -> Vec<BlockKind> {
        match self {
            Self::FormField => vec![BlockKind::Field],
            Self::ContentElement => vec![
                BlockKind::Text,
                BlockKind::Heading,
                BlockKind::Image,
                BlockKind::Button,
                BlockKind::Video,
                BlockKind::Divider,
                BlockKind::Spacer,
            ],
            Self::Nested => vec![
                BlockKind::Section,
                BlockKind::Container,
                BlockKind::Grid,
                BlockKind::Form,
                BlockKind::Canvas,
                BlockKind::Text,
                BlockKind::Heading,
                BlockKind::Image,
                BlockKind::Button,
            ],
        }
    }

    /// Whether `kind` may be inserted in this mode.
    #[must_use]
    pub fn offers(self, kind: &BlockKind) -> bool {
        self.offered_kinds().contains(kind)
    }
}

/// A picker attached to one container, optionally targeting a specific index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPicker {
    /// Container the new block goes into.
    pub parent_id: BlockId,
    /// Picker mode derived from the container's position.
    pub mode: InsertionMode,
    /// Insert position; `None` appends.
    pub index: Option<usize>,
}

impl InsertionPicker {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }
}
