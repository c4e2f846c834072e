//! Configurable tree renderer.
//!
//! Walks the document from the root and produces a flat list of
//! [`RowItem`]s in display order: one node row per visible block, followed
//! (for expanded containers) by the rows of its children, an empty-container
//! drop zone when it has none, and its insertion picker. The host draws rows
//! in order; nothing here touches a UI toolkit.
//!
//! Behaviour that used to differ between sidebar variants is selected through
//! [`TreeConfig`]: inline rename, duplicate/delete buttons, fixed or nested
//! indentation, and whether header/footer blocks can be dragged.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::block::{Block, BlockId};
use crate::catalog;
use crate::consts::{FIXED_INDENT_STEP_PX, NESTED_INDENT_MARGIN_PX};
use crate::event::{NodeContext, SlotPosition};
use crate::picker::InsertionPicker;
use crate::state::{DropTarget, TreeState};
use crate::store::EditorStore;

/// How rows are indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    /// Every row carries `depth * step` pixels of indent.
    Fixed { step: u32 },
    /// Each children container adds `margin`; rows carry only their own level's margin.
    Nested { margin: u32 },
}

impl Indentation {
    #[must_use]
    pub fn indent_px(self, depth: usize) -> u32 {
        match self {
            Self::Fixed { step } => step.saturating_mul(u32::try_from(depth).unwrap_or(u32::MAX)),
            Self::Nested { margin } => {
                if depth == 0 {
                    0
                } else {
                    margin
                }
            }
        }
    }
}

/// Feature flags for one tree instance.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Double-click a name to rename in place.
    pub rename: bool,
    /// Show inline duplicate/delete buttons.
    pub actions: bool,
    pub indentation: Indentation,
    /// Header and footer blocks cannot be dragged.
    pub protect_header_footer: bool,
}

impl TreeConfig {
    /// Outline sidebar: rename in place, nested indentation.
    #[must_use]
    pub fn outline() -> Self {
        Self {
            rename: true,
            actions: false,
            indentation: Indentation::Nested { margin: NESTED_INDENT_MARGIN_PX },
            protect_header_footer: false,
        }
    }

    /// Layers panel: action buttons, fixed indentation, pinned header/footer.
    #[must_use]
    pub fn layers() -> Self {
        Self {
            rename: false,
            actions: true,
            indentation: Indentation::Fixed { step: FIXED_INDENT_STEP_PX },
            protect_header_footer: true,
        }
    }

    /// Whether the row described by `ctx` may start a drag.
    #[must_use]
    pub fn can_drag(&self, ctx: &NodeContext) -> bool {
        !ctx.is_root() && !(self.protect_header_footer && ctx.kind.is_header_or_footer())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            rename: false,
            actions: false,
            indentation: Indentation::Nested { margin: NESTED_INDENT_MARGIN_PX },
            protect_header_footer: false,
        }
    }
}

/// One rendered block.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub context: NodeContext,
    pub name: String,
    pub icon: &'static str,
    pub indent_px: u32,
    pub expandable: bool,
    pub expanded: bool,
    pub selected: bool,
    pub hidden: bool,
    pub has_interactions: bool,
    pub has_shared_style: bool,
    pub draggable: bool,
    /// This row is the source of the active drag.
    pub dragging: bool,
    /// Drop indicator to draw on this row, if its slot is the hovered target.
    pub drop_indicator: Option<SlotPosition>,
    /// Show the rename input instead of the name.
    pub renaming: bool,
    /// Show duplicate/delete buttons.
    pub show_actions: bool,
}

/// One item in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowItem {
    Node(NodeRow),
    /// Drop zone shown inside an expanded container with no children.
    EmptyDropZone { parent_id: BlockId, depth: usize, indent_px: u32, active: bool },
    /// Insertion picker at the end of an expanded container.
    Picker { picker: InsertionPicker, depth: usize, indent_px: u32 },
}

/// Render the whole document into display-ordered rows.
#[must_use]
pub fn render_tree(store: &impl EditorStore, state: &TreeState, config: &TreeConfig) -> Vec<RowItem> {
    let root = store.root();
    let mut rows = Vec::new();
    render_node(store, state, config, root, NodeContext::root(root), 0, &mut rows);
    rows
}

fn render_node(
    store: &impl EditorStore,
    state: &TreeState,
    config: &TreeConfig,
    block: &Block,
    ctx: NodeContext,
    sibling_count: usize,
    rows: &mut Vec<RowItem>,
) {
    let entry = catalog::entry(&block.kind);
    let expanded = ctx.can_expand() && state.is_expanded(&block.id);
    let depth = ctx.depth;
    let child_indent = config.indentation.indent_px(depth + 1);

    rows.push(RowItem::Node(NodeRow {
        name: catalog::display_name(block),
        icon: entry.icon,
        indent_px: config.indentation.indent_px(depth),
        expandable: ctx.can_expand(),
        expanded,
        selected: store.selected_block_id() == Some(block.id.as_str()),
        hidden: block.is_hidden(),
        has_interactions: !store.interactions_for(&block.id).is_empty(),
        has_shared_style: block.shared_style_id.is_some(),
        draggable: config.can_drag(&ctx),
        dragging: state.is_drag_source(&block.id),
        drop_indicator: drop_indicator(state, &ctx, sibling_count),
        renaming: config.rename && state.is_renaming(&block.id),
        show_actions: config.actions && !ctx.is_root(),
        context: ctx.clone(),
    }));

    if !expanded {
        return;
    }

    for (index, child) in block.children.iter().enumerate() {
        render_node(store, state, config, child, ctx.child(child, index), block.children.len(), rows);
    }

    if block.children.is_empty() && block.kind.permits_children() {
        let active = matches!(
            state.drop_target(),
            Some(DropTarget::EmptyParent { parent_id }) if *parent_id == block.id
        );
        rows.push(RowItem::EmptyDropZone {
            parent_id: block.id.clone(),
            depth: depth + 1,
            indent_px: child_indent,
            active,
        });
    }

    if block.kind.permits_children() {
        rows.push(RowItem::Picker {
            picker: InsertionPicker { parent_id: block.id.clone(), mode: ctx.child_mode, index: None },
            depth: depth + 1,
            indent_px: child_indent,
        });
    }
}

/// A slot target `(P, i)` lights up row `i` of `P` on its leading edge; the
/// slot past the last child lights up the last row on its trailing edge.
fn drop_indicator(state: &TreeState, ctx: &NodeContext, sibling_count: usize) -> Option<SlotPosition> {
    let Some(DropTarget::Slot { parent_id, index }) = state.drop_target() else {
        return None;
    };
    if ctx.parent_id.as_ref() != Some(parent_id) {
        return None;
    }
    if *index == ctx.index {
        Some(SlotPosition::Before)
    } else if *index == ctx.index + 1 && *index == sibling_count {
        Some(SlotPosition::After)
    } else {
        None
    }
}
