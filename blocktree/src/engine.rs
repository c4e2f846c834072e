//! Root-owned tree engine: gesture → event → store command.
//!
//! DESIGN
//! ======
//! Each row turns a gesture into a [`TreeEvent`] using only its own
//! [`NodeContext`] and the tree config ([`TreeEngine::event_for`]). The event
//! then goes to the single root handler ([`TreeEngine::handle`]), which owns
//! the [`TreeState`]. UI-only events (expand, drag hover, rename start/cancel)
//! change that state; the rest resolve into an [`Action`] for the host or a
//! [`StoreCommand`] for the store. [`TreeEngine::dispatch`] runs both steps
//! and applies the result to an [`EditorStore`].
//!
//! Invalid input (drag-start on the root, drop with no drag, a stale rename
//! blur) is a no-op rather than an error.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::block::BlockId;
use crate::event::{Gesture, NodeContext, SlotPosition, TreeEvent};
use crate::render::{RowItem, TreeConfig, render_tree};
use crate::state::{DragSource, DropTarget, TreeState};
use crate::store::{EditorStore, StoreCommand, TreeError};

/// What the root handler wants the host to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond a possible re-render.
    None,
    /// Tree state changed; re-render.
    RenderNeeded,
    /// Forward a mutation to the store.
    Command(StoreCommand),
    /// Make this block the selected block.
    Select(BlockId),
    /// Open the block context menu.
    OpenContextMenu(BlockId),
}

/// Owner of one tree's interaction state.
#[derive(Debug, Clone, Default)]
pub struct TreeEngine {
    pub state: TreeState,
    pub config: TreeConfig,
}

impl TreeEngine {
    #[must_use]
    pub fn new(config: TreeConfig) -> Self {
        Self { state: TreeState::new(), config }
    }

    /// Render the current document with this engine's state and config.
    #[must_use]
    pub fn rows(&self, store: &impl EditorStore) -> Vec<RowItem> {
        render_tree(store, &self.state, &self.config)
    }

    // --- Node side ---

    /// Translate a gesture on one row into the event that row emits.
    ///
    /// Returns `None` when the gesture is not valid for this row (for example
    /// dragging the root, or renaming when rename is disabled).
    #[must_use]
    pub fn event_for(&self, ctx: &NodeContext, gesture: Gesture) -> Option<TreeEvent> {
        let block_id = ctx.block_id.clone();
        match gesture {
            Gesture::ToggleClick => ctx
                .can_expand()
                .then_some(TreeEvent::ToggleExpansion { block_id }),
            Gesture::Click => Some(TreeEvent::Select { block_id }),
            Gesture::ContextMenu => Some(TreeEvent::ContextMenu { block_id }),
            Gesture::DoubleClickName => self
                .config
                .rename
                .then_some(TreeEvent::StartRename { block_id }),
            Gesture::DragStart => {
                if !self.config.can_drag(ctx) {
                    return None;
                }
                let parent_id = ctx.parent_id.clone()?;
                Some(TreeEvent::DragStart { parent_id, index: ctx.index, block_id })
            }
            Gesture::DragOver(position) => {
                let (parent_id, index) = slot(ctx, position)?;
                Some(TreeEvent::DragOver { parent_id, index })
            }
            Gesture::DragLeave(position) => {
                let (parent_id, index) = slot(ctx, position)?;
                Some(TreeEvent::DragLeave { parent_id, index })
            }
            Gesture::Drop(position) => {
                let (parent_id, index) = slot(ctx, position)?;
                Some(TreeEvent::Drop { parent_id, index })
            }
            Gesture::DragEnd => Some(TreeEvent::DragEnd),
            Gesture::DragOverEmpty => accepts_empty_drop(ctx).then_some(TreeEvent::EmptyDragOver { parent_id: block_id }),
            Gesture::DragLeaveEmpty => {
                accepts_empty_drop(ctx).then_some(TreeEvent::EmptyDragLeave { parent_id: block_id })
            }
            Gesture::DropOnEmpty => accepts_empty_drop(ctx).then_some(TreeEvent::EmptyDrop { parent_id: block_id }),
            Gesture::RenameKey { key, value } => {
                if !self.config.rename {
                    return None;
                }
                if key.is_enter() {
                    Some(TreeEvent::FinishRename { block_id, name: value })
                } else if key.is_escape() {
                    Some(TreeEvent::CancelRename { block_id })
                } else {
                    None
                }
            }
            Gesture::RenameBlur { value } => self
                .config
                .rename
                .then_some(TreeEvent::FinishRename { block_id, name: value }),
            Gesture::PickBlockType { kind, index } => {
                if !ctx.kind.permits_children() || !ctx.child_mode.offers(&kind) {
                    return None;
                }
                Some(match index {
                    Some(index) => TreeEvent::AddChildAtPosition { parent_id: block_id, block_type: kind, index },
                    None => TreeEvent::AddChild { parent_id: block_id, block_type: kind },
                })
            }
            Gesture::DuplicateClick => {
                (self.config.actions && !ctx.is_root()).then_some(TreeEvent::Duplicate { block_id })
            }
            Gesture::DeleteClick => (self.config.actions && !ctx.is_root()).then_some(TreeEvent::Delete { block_id }),
        }
    }

    // --- Root side ---

    /// Root handler: apply an event to the tree state and resolve it.
    pub fn handle(&mut self, event: TreeEvent) -> Action {
        match event {
            TreeEvent::ToggleExpansion { block_id } => {
                self.state.toggle(&block_id);
                Action::RenderNeeded
            }
            TreeEvent::ContextMenu { block_id } => Action::OpenContextMenu(block_id),
            TreeEvent::Select { block_id } => Action::Select(block_id),
            TreeEvent::DragStart { parent_id, index, block_id } => {
                self.state.start_drag(DragSource { parent_id, index, block_id });
                Action::RenderNeeded
            }
            TreeEvent::DragOver { parent_id, index } => {
                self.state.set_drop_target(DropTarget::Slot { parent_id, index });
                Action::RenderNeeded
            }
            TreeEvent::DragLeave { parent_id, index } => {
                self.state.clear_drop_target(&DropTarget::Slot { parent_id, index });
                Action::RenderNeeded
            }
            TreeEvent::EmptyDragOver { parent_id } => {
                self.state.set_drop_target(DropTarget::EmptyParent { parent_id });
                Action::RenderNeeded
            }
            TreeEvent::EmptyDragLeave { parent_id } => {
                self.state.clear_drop_target(&DropTarget::EmptyParent { parent_id });
                Action::RenderNeeded
            }
            TreeEvent::Drop { parent_id, index } => self.resolve_slot_drop(parent_id, index),
            TreeEvent::EmptyDrop { parent_id } => self.resolve_empty_drop(parent_id),
            TreeEvent::DragEnd => {
                self.state.take_drag();
                Action::RenderNeeded
            }
            TreeEvent::AddChild { parent_id, block_type } => {
                Action::Command(StoreCommand::Add { parent_id, kind: block_type, index: None })
            }
            TreeEvent::AddChildAtPosition { parent_id, block_type, index } => {
                Action::Command(StoreCommand::Add { parent_id, kind: block_type, index: Some(index) })
            }
            TreeEvent::StartRename { block_id } => {
                self.state.start_rename(&block_id);
                Action::RenderNeeded
            }
            TreeEvent::FinishRename { block_id, name } => self.finish_rename(block_id, &name),
            TreeEvent::CancelRename { block_id } => {
                if self.state.end_rename(&block_id) {
                    Action::RenderNeeded
                } else {
                    Action::None
                }
            }
            TreeEvent::Duplicate { block_id } => Action::Command(StoreCommand::Duplicate { block_id }),
            TreeEvent::Delete { block_id } => {
                self.state.end_rename(&block_id);
                self.state.collapse(&block_id);
                Action::Command(StoreCommand::Delete { block_id })
            }
        }
    }

    fn resolve_slot_drop(&mut self, parent_id: BlockId, index: usize) -> Action {
        let Some(drag) = self.state.take_drag() else {
            return Action::None;
        };
        let source = drag.source;
        if source.parent_id == parent_id && source.index == index {
            debug!(block_id = %source.block_id, "drop on own slot ignored");
            return Action::RenderNeeded;
        }
        Action::Command(StoreCommand::Move { block_id: source.block_id, parent_id, index })
    }

    fn resolve_empty_drop(&mut self, parent_id: BlockId) -> Action {
        let Some(drag) = self.state.take_drag() else {
            return Action::None;
        };
        if drag.source.block_id == parent_id {
            return Action::RenderNeeded;
        }
        Action::Command(StoreCommand::MoveIntoEmpty { block_id: drag.source.block_id, parent_id })
    }

    fn finish_rename(&mut self, block_id: BlockId, name: &str) -> Action {
        if !self.state.end_rename(&block_id) {
            return Action::None;
        }
        let name = name.trim();
        if name.is_empty() {
            return Action::RenderNeeded;
        }
        Action::Command(StoreCommand::Rename { block_id, name: name.to_owned() })
    }

    // --- Full round trip ---

    /// Run a gesture through the row and root handlers and apply the result to `store`.
    ///
    /// Moves into the dragged block's own subtree or into a block that cannot
    /// hold children, and renames to the current name, are dropped here so
    /// they never reach the store. The parent of an applied add or
    /// move-into-empty is expanded.
    ///
    /// # Errors
    ///
    /// Returns the store's [`TreeError`] if it rejects the resolved command.
    pub fn dispatch<S: EditorStore>(
        &mut self,
        store: &mut S,
        ctx: &NodeContext,
        gesture: Gesture,
    ) -> Result<Action, TreeError> {
        let Some(event) = self.event_for(ctx, gesture) else {
            return Ok(Action::None);
        };
        debug!(?event, "tree event");
        let action = self.handle(event);
        match &action {
            Action::Command(command) => {
                if is_no_op(store, command) {
                    debug!(?command, "no-op command skipped");
                    return Ok(Action::RenderNeeded);
                }
                let touched = store.apply(command)?;
                debug!(%touched, "store command applied");
                if let StoreCommand::Add { parent_id, .. } | StoreCommand::MoveIntoEmpty { parent_id, .. } = command {
                    self.state.expand(parent_id);
                }
            }
            Action::Select(block_id) => store.set_selected_block_id(Some(block_id.clone())),
            Action::None | Action::RenderNeeded | Action::OpenContextMenu(_) => {}
        }
        Ok(action)
    }

    /// Like [`TreeEngine::dispatch`], resolving the row context from a block id.
    ///
    /// Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns the store's [`TreeError`] if it rejects the resolved command.
    pub fn dispatch_on<S: EditorStore>(
        &mut self,
        store: &mut S,
        block_id: &str,
        gesture: Gesture,
    ) -> Result<Action, TreeError> {
        let Some(ctx) = NodeContext::resolve(store.root(), block_id) else {
            return Ok(Action::None);
        };
        self.dispatch(store, &ctx, gesture)
    }
}

/// Slot `(parent, index)` addressed by a drag over one side of a row.
fn slot(ctx: &NodeContext, position: SlotPosition) -> Option<(BlockId, usize)> {
    let parent_id = ctx.parent_id.clone()?;
    let index = match position {
        SlotPosition::Before => ctx.index,
        SlotPosition::After => ctx.index + 1,
    };
    Some((parent_id, index))
}

fn accepts_empty_drop(ctx: &NodeContext) -> bool {
    ctx.kind.permits_children() && !ctx.has_children
}

fn is_no_op(store: &impl EditorStore, command: &StoreCommand) -> bool {
    match command {
        StoreCommand::Move { block_id, parent_id, .. } | StoreCommand::MoveIntoEmpty { block_id, parent_id } => {
            let into_own_subtree = store.block(block_id).is_some_and(|block| block.contains(parent_id));
            let parent_holds_children = store.block(parent_id).is_some_and(|parent| parent.kind.permits_children());
            into_own_subtree || !parent_holds_children
        }
        StoreCommand::Rename { block_id, name } => store.block(block_id).is_some_and(|block| block.name == *name),
        StoreCommand::Add { .. } | StoreCommand::Duplicate { .. } | StoreCommand::Delete { .. } => false,
    }
}
