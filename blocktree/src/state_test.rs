use super::*;
use crate::block::BlockKind;

fn source(block: &str, parent: &str, index: usize) -> DragSource {
    DragSource { parent_id: parent.into(), index, block_id: block.into() }
}

// =============================================================
// Expansion
// =============================================================

#[test]
fn expanding_one_block_leaves_siblings_alone() {
    let mut state = TreeState::new();
    state.expand("b");
    assert!(state.is_expanded("b"));
    assert!(!state.is_expanded("a"));
    assert!(!state.is_expanded("c"));
    assert_eq!(state.expanded().len(), 1);
}

#[test]
fn toggle_flips_and_reports() {
    let mut state = TreeState::new();
    assert!(state.toggle("a"));
    assert!(state.is_expanded("a"));
    assert!(!state.toggle("a"));
    assert!(!state.is_expanded("a"));
}

#[test]
fn expand_all_skips_leaves() {
    let root = Block::new("root", BlockKind::Page, "").with_children(vec![
        Block::new("s", BlockKind::Section, "").with_children(vec![Block::new("t", BlockKind::Text, "")]),
        Block::new("img", BlockKind::Image, ""),
    ]);
    let mut state = TreeState::new();
    state.expand_all(&root);
    assert!(state.is_expanded("root"));
    assert!(state.is_expanded("s"));
    assert!(!state.is_expanded("t"));
    assert!(!state.is_expanded("img"));
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drop_target_requires_active_drag() {
    let mut state = TreeState::new();
    state.set_drop_target(DropTarget::Slot { parent_id: "p".into(), index: 0 });
    assert!(state.drop_target().is_none());
}

#[test]
fn new_drag_replaces_previous() {
    let mut state = TreeState::new();
    state.start_drag(source("a", "p", 0));
    state.set_drop_target(DropTarget::EmptyParent { parent_id: "q".into() });
    state.start_drag(source("b", "p", 1));
    assert!(state.is_drag_source("b"));
    assert!(!state.is_drag_source("a"));
    assert!(state.drop_target().is_none());
}

#[test]
fn clear_drop_target_only_clears_matching_target() {
    let mut state = TreeState::new();
    state.start_drag(source("a", "p", 0));
    let current = DropTarget::Slot { parent_id: "p".into(), index: 2 };
    state.set_drop_target(current.clone());
    state.clear_drop_target(&DropTarget::Slot { parent_id: "p".into(), index: 1 });
    assert_eq!(state.drop_target(), Some(&current));
    state.clear_drop_target(&current);
    assert!(state.drop_target().is_none());
}

#[test]
fn take_drag_ends_it() {
    let mut state = TreeState::new();
    state.start_drag(source("a", "p", 0));
    assert!(state.take_drag().is_some());
    assert!(state.drag().is_none());
}

// =============================================================
// Rename
// =============================================================

#[test]
fn only_one_rename_at_a_time() {
    let mut state = TreeState::new();
    state.start_rename("a");
    state.start_rename("b");
    assert!(state.is_renaming("b"));
    assert!(!state.is_renaming("a"));
    assert_eq!(state.renaming(), Some("b"));
}

#[test]
fn end_rename_ignores_stale_block() {
    let mut state = TreeState::new();
    state.start_rename("b");
    assert!(!state.end_rename("a"));
    assert!(state.is_renaming("b"));
    assert!(state.end_rename("b"));
    assert_eq!(state.renaming(), None);
}
