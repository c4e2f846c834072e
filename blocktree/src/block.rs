//! Block document model: the nodes of the page-builder content tree.
//!
//! A page is a single rooted tree of [`Block`]s. Each block owns its ordered
//! children, so the tree is acyclic by construction and every non-root block
//! has exactly one parent. Lookups that need the parent or the ancestor chain
//! walk down from the root; documents are small enough that this stays cheap.

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Unique identifier for a block.
pub type BlockId = String;

/// The type of a block.
///
/// Unknown type names read from a document are kept verbatim in
/// [`BlockKind::Other`] so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    /// Document root.
    Page,
    /// Top-level page section.
    Section,
    /// Generic layout container.
    Container,
    /// Multi-column grid.
    Grid,
    /// Site header.
    Header,
    /// Site footer.
    Footer,
    /// Form whose descendants are input fields.
    Form,
    /// Free-positioned content canvas.
    Canvas,
    /// Form input field.
    Field,
    /// Paragraph text.
    Text,
    /// Heading text.
    Heading,
    /// Image element.
    Image,
    /// Button or link element.
    Button,
    /// Embedded video.
    Video,
    /// Horizontal rule.
    Divider,
    /// Vertical whitespace.
    Spacer,
    /// Any type name this crate does not know about.
    Other(String),
}

impl BlockKind {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Container => "container",
            Self::Grid => "grid",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Form => "form",
            Self::Canvas => "canvas",
            Self::Field => "field",
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Button => "button",
            Self::Video => "video",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::Other(name) => name,
        }
    }

    /// Whether blocks of this type may structurally hold children.
    #[must_use]
    pub fn permits_children(&self) -> bool {
        matches!(
            self,
            Self::Page
                | Self::Section
                | Self::Container
                | Self::Grid
                | Self::Header
                | Self::Footer
                | Self::Form
                | Self::Canvas
        )
    }

    /// Header and footer blocks are pinned to the page edges.
    #[must_use]
    pub fn is_header_or_footer(&self) -> bool {
        matches!(self, Self::Header | Self::Footer)
    }
}

impl From<String> for BlockKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "container" => Self::Container,
            "grid" => Self::Grid,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "form" => Self::Form,
            "canvas" => Self::Canvas,
            "field" => Self::Field,
            "text" => Self::Text,
            "heading" => Self::Heading,
            "image" => Self::Image,
            "button" => Self::Button,
            "video" => Self::Video,
            "divider" => Self::Divider,
            "spacer" => Self::Spacer,
            _ => Self::Other(value),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// A node in the page-builder content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique identifier for this block.
    pub id: BlockId,
    /// Display name shown in the sidebar. Empty means "use the type label".
    #[serde(default)]
    pub name: String,
    /// Block type.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Ordered child blocks.
    #[serde(default)]
    pub children: Vec<Block>,
    /// Reference to a shared style, if this block uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_style_id: Option<String>,
    /// Open-ended per-type settings (`hidden`, colors, field config, ...).
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl Block {
    /// Create a childless block with empty settings.
    #[must_use]
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: Vec::new(),
            shared_style_id: None,
            settings: Map::new(),
        }
    }

    /// Builder-style helper that replaces the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// `settings.hidden`, defaulting to `false`.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.settings
            .get("hidden")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// A block can be expanded if its type permits children or it already has some.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.kind.permits_children() || self.has_children()
    }

    /// Find a block by id within this subtree (including `self`).
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable variant of [`Block::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Whether `id` names this block or one of its descendants.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Find the parent of `id` within this subtree, together with the child's index.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<(&Block, usize)> {
        if let Some(index) = self.children.iter().position(|child| child.id == id) {
            return Some((self, index));
        }
        self.children.iter().find_map(|child| child.parent_of(id))
    }

    /// Chain of blocks from `self` down to and including `id`.
    ///
    /// Returns `None` when `id` is not in this subtree.
    #[must_use]
    pub fn path_to(&self, id: &str) -> Option<Vec<&Block>> {
        if self.id == id {
            return Some(vec![self]);
        }
        for child in &self.children {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self);
                return Some(path);
            }
        }
        None
    }

    /// Deep copy of this subtree with every block given a fresh id.
    #[must_use]
    pub fn duplicate(&self) -> Block {
        Block {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            children: self.children.iter().map(Block::duplicate).collect(),
            shared_style_id: self.shared_style_id.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Collect the ids of this block and all of its descendants, depth first.
    #[must_use]
    pub fn subtree_ids(&self) -> Vec<BlockId> {
        let mut ids = vec![self.id.clone()];
        for child in &self.children {
            ids.extend(child.subtree_ids());
        }
        ids
    }
}
