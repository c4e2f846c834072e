use serde_json::json;

use super::*;
use crate::block::BlockKind;
use crate::picker::InsertionMode;
use crate::state::DragSource;
use crate::store::{DocumentStore, Interaction};

fn store() -> DocumentStore {
    let mut hidden = Block::new("img", BlockKind::Image, "");
    hidden.settings.insert("hidden".into(), json!(true));
    let mut styled = Block::new("cta", BlockKind::Button, "Buy");
    styled.shared_style_id = Some("primary".into());

    let root = Block::new("root", BlockKind::Page, "Home").with_children(vec![
        Block::new("hero", BlockKind::Section, "Hero").with_children(vec![hidden, styled]),
        Block::new("signup", BlockKind::Form, "Signup"),
    ]);
    DocumentStore::new(root).with_interactions(vec![Interaction {
        id: "i1".into(),
        trigger_block_id: "cta".into(),
        target_block_id: None,
        event: "click".into(),
        action: "navigate".into(),
    }])
}

fn nodes(rows: &[RowItem]) -> Vec<&NodeRow> {
    rows.iter()
        .filter_map(|row| match row {
            RowItem::Node(node) => Some(node),
            _ => None,
        })
        .collect()
}

fn node<'a>(rows: &'a [RowItem], id: &str) -> &'a NodeRow {
    nodes(rows)
        .into_iter()
        .find(|n| n.context.block_id == id)
        .unwrap()
}

#[test]
fn collapsed_root_renders_single_row() {
    let rows = render_tree(&store(), &TreeState::new(), &TreeConfig::outline());
    assert_eq!(rows.len(), 1);
    let root = node(&rows, "root");
    assert!(root.expandable);
    assert!(!root.expanded);
    assert!(!root.draggable);
    assert_eq!(root.icon, "file");
}

#[test]
fn expanded_tree_lists_rows_in_display_order() {
    let store = store();
    let mut state = TreeState::new();
    state.expand_all(store.root());
    let rows = render_tree(&store, &state, &TreeConfig::outline());
    let ids: Vec<&str> = nodes(&rows).iter().map(|n| n.context.block_id.as_str()).collect();
    assert_eq!(ids, vec!["root", "hero", "img", "cta", "signup"]);
}

#[test]
fn row_flags_reflect_block_and_store() {
    let mut store = store();
    store.set_selected_block_id(Some("cta".into()));
    let mut state = TreeState::new();
    state.expand_all(store.root());
    let rows = render_tree(&store, &state, &TreeConfig::outline());

    let img = node(&rows, "img");
    assert!(img.hidden);
    assert_eq!(img.name, "Image");
    assert!(!img.expandable);

    let cta = node(&rows, "cta");
    assert!(cta.selected);
    assert!(cta.has_interactions);
    assert!(cta.has_shared_style);
    assert!(!node(&rows, "hero").selected);
}

#[test]
fn empty_expanded_container_gets_drop_zone_and_picker() {
    let store = store();
    let mut state = TreeState::new();
    state.expand("root");
    state.expand("signup");
    state.start_drag(DragSource { parent_id: "root".into(), index: 0, block_id: "hero".into() });
    state.set_drop_target(DropTarget::EmptyParent { parent_id: "signup".into() });
    let rows = render_tree(&store, &state, &TreeConfig::outline());

    assert!(rows.iter().any(|row| matches!(
        row,
        RowItem::EmptyDropZone { parent_id, active: true, depth: 2, .. } if parent_id == "signup"
    )));
    let picker = rows
        .iter()
        .find_map(|row| match row {
            RowItem::Picker { picker, .. } if picker.parent_id == "signup" => Some(picker),
            _ => None,
        })
        .unwrap();
    assert_eq!(picker.mode, InsertionMode::FormField);
    assert_eq!(picker.label(), "Add field");
    assert!(node(&rows, "hero").dragging);
}

#[test]
fn slot_target_lights_matching_row() {
    let store = store();
    let mut state = TreeState::new();
    state.expand_all(store.root());
    state.start_drag(DragSource { parent_id: "root".into(), index: 1, block_id: "signup".into() });

    state.set_drop_target(DropTarget::Slot { parent_id: "hero".into(), index: 1 });
    let rows = render_tree(&store, &state, &TreeConfig::outline());
    assert_eq!(node(&rows, "cta").drop_indicator, Some(SlotPosition::Before));
    assert_eq!(node(&rows, "img").drop_indicator, None);

    state.set_drop_target(DropTarget::Slot { parent_id: "hero".into(), index: 2 });
    let rows = render_tree(&store, &state, &TreeConfig::outline());
    assert_eq!(node(&rows, "cta").drop_indicator, Some(SlotPosition::After));
}

#[test]
fn fixed_indentation_scales_with_depth() {
    let store = store();
    let mut state = TreeState::new();
    state.expand_all(store.root());
    let rows = render_tree(&store, &state, &TreeConfig::layers());
    assert_eq!(node(&rows, "root").indent_px, 0);
    assert_eq!(node(&rows, "hero").indent_px, FIXED_INDENT_STEP_PX);
    assert_eq!(node(&rows, "cta").indent_px, 2 * FIXED_INDENT_STEP_PX);
}

#[test]
fn nested_indentation_is_per_level() {
    let store = store();
    let mut state = TreeState::new();
    state.expand_all(store.root());
    let rows = render_tree(&store, &state, &TreeConfig::outline());
    assert_eq!(node(&rows, "hero").indent_px, NESTED_INDENT_MARGIN_PX);
    assert_eq!(node(&rows, "cta").indent_px, NESTED_INDENT_MARGIN_PX);
}

#[test]
fn actions_and_rename_follow_config() {
    let store = store();
    let mut state = TreeState::new();
    state.expand_all(store.root());
    state.start_rename("hero");

    let layers = render_tree(&store, &state, &TreeConfig::layers());
    assert!(node(&layers, "hero").show_actions);
    assert!(!node(&layers, "root").show_actions);
    assert!(!node(&layers, "hero").renaming);

    let outline = render_tree(&store, &state, &TreeConfig::outline());
    assert!(!node(&outline, "hero").show_actions);
    assert!(node(&outline, "hero").renaming);
}
