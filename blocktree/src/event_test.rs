use serde_json::json;

use super::*;

fn page() -> Block {
    Block::new("root", BlockKind::Page, "").with_children(vec![
        Block::new("hero", BlockKind::Section, ""),
        Block::new("signup", BlockKind::Form, "").with_children(vec![
            Block::new("row", BlockKind::Grid, "").with_children(vec![Block::new("email", BlockKind::Field, "")]),
        ]),
    ])
}

#[test]
fn key_helpers() {
    assert!(Key("Enter".into()).is_enter());
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("a".into()).is_enter());
}

#[test]
fn resolve_root() {
    let ctx = NodeContext::resolve(&page(), "root").unwrap();
    assert!(ctx.is_root());
    assert_eq!(ctx.depth, ROOT_DEPTH);
    assert!(ctx.has_children);
}

#[test]
fn resolve_nested_block_tracks_parent_index_and_depth() {
    let ctx = NodeContext::resolve(&page(), "email").unwrap();
    assert_eq!(ctx.parent_id.as_deref(), Some("row"));
    assert_eq!(ctx.index, 0);
    assert_eq!(ctx.depth, 3);
    assert!(!ctx.can_expand());
}

#[test]
fn child_mode_inherits_form_context() {
    let ctx = NodeContext::resolve(&page(), "row").unwrap();
    assert_eq!(ctx.child_mode, InsertionMode::FormField);
    let hero = NodeContext::resolve(&page(), "hero").unwrap();
    assert_eq!(hero.child_mode, InsertionMode::Nested);
    assert_eq!(hero.index, 0);
}

#[test]
fn resolve_unknown_is_none() {
    assert!(NodeContext::resolve(&page(), "ghost").is_none());
}

#[test]
fn events_serialize_with_kebab_names_and_camel_payloads() {
    let event = TreeEvent::AddChildAtPosition { parent_id: "p".into(), block_type: BlockKind::Field, index: 2 };
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({ "event": "add-child-at-position", "parentId": "p", "blockType": "field", "index": 2 })
    );
    assert_eq!(serde_json::to_value(TreeEvent::DragEnd).unwrap(), json!({ "event": "drag-end" }));
}

#[test]
fn events_deserialize_from_host_payloads() {
    let event: TreeEvent =
        serde_json::from_value(json!({ "event": "finish-rename", "blockId": "b", "name": "New" })).unwrap();
    assert_eq!(event, TreeEvent::FinishRename { block_id: "b".into(), name: "New".into() });
}
