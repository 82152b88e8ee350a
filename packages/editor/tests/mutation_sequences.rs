//! Tests for longer mutation sequences
//!
//! This tests:
//! - Move + resize + delete chains
//! - Undo/redo sequences
//! - Batched edits
//! - Tree integrity after every step

use pagesmith_editor::{
    tree, ComponentType, EditSession, Mutation, NodeFactory, Page, Placement, Props,
};
use serde_json::{json, Value};

fn props(value: Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}

fn session() -> EditSession {
    let mut factory = NodeFactory::sequential("seq");
    let page = Page::with_welcome_content("page-1", "user-1", &mut factory);
    EditSession::with_factory("tab-1", page, factory)
}

fn add(session: &mut EditSession, component_type: ComponentType, placement: Placement) -> String {
    session
        .apply(Mutation::AddComponent {
            component_type,
            placement,
        })
        .unwrap()
        .selected_id
        .unwrap()
}

#[test]
fn test_build_move_resize_delete_chain() {
    let mut session = session();
    let section = session.tree()[0].id.clone();

    let columns = add(&mut session, ComponentType::Columns, Placement::inside(&section));
    let left = add(&mut session, ComponentType::Heading, Placement::in_column(&columns, 0));
    let right = add(&mut session, ComponentType::Text, Placement::in_column(&columns, 1));
    assert!(tree::validate(session.tree()).is_ok());

    // move right column's text under the left heading
    session
        .apply(Mutation::MoveComponent {
            node_id: right.clone(),
            placement: Placement::in_column(&columns, 0).after(&left),
        })
        .unwrap();
    let location = tree::locate(session.tree(), &right).unwrap();
    assert_eq!(location.column_index, Some(0));
    assert_eq!(location.index, 1);

    // shrink to one column: column 0 content survives
    session
        .apply(Mutation::UpdateProps {
            node_id: columns.clone(),
            props: props(json!({ "numberOfColumns": 1 })),
        })
        .unwrap();
    assert!(session.page().find(&left).is_some());
    assert!(session.page().find(&right).is_some());
    assert!(tree::validate(session.tree()).is_ok());

    // deleting the columns node takes its whole subtree
    session.select(&right).unwrap();
    session
        .apply(Mutation::DeleteComponent { node_id: columns.clone() })
        .unwrap();
    assert!(session.page().find(&left).is_none());
    assert!(session.selected_id().is_none());
    assert_eq!(session.page().node_count(), 4);
}

#[test]
fn test_undo_walks_back_every_step() {
    let mut session = session();
    let original = session.page().clone();
    let section = session.tree()[0].id.clone();

    let footer = add(&mut session, ComponentType::Footer, Placement::top_level());
    session
        .apply(Mutation::MoveComponent {
            node_id: footer.clone(),
            placement: Placement::top_level().before(&section),
        })
        .unwrap();
    session
        .apply(Mutation::RenamePage { name: "Launch".into() })
        .unwrap();

    assert!(session.undo());
    assert_eq!(session.page().page_name, original.page_name);
    assert_eq!(session.tree()[0].id, footer);

    assert!(session.undo());
    assert_eq!(session.tree()[1].id, footer);

    assert!(session.undo());
    assert_eq!(session.page(), &original);
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.page().find(&footer).is_some());
}

#[test]
fn test_batched_prop_edits_undo_together() {
    let mut session = session();
    let button = session.tree()[0].children().unwrap()[2].id.clone();

    session.begin_batch();
    for color in ["#111111", "#222222", "#333333"] {
        session
            .apply(Mutation::UpdateProps {
                node_id: button.clone(),
                props: props(json!({ "backgroundColor": color })),
            })
            .unwrap();
    }
    session.end_batch();

    assert_eq!(
        session.page().find(&button).unwrap().prop_str("backgroundColor"),
        Some("#333333")
    );

    assert!(session.undo());
    assert_eq!(
        session.page().find(&button).unwrap().prop_str("backgroundColor"),
        Some("#2563eb")
    );
}

#[test]
fn test_duplicate_then_edit_copy_only() {
    let mut session = session();
    let section = session.tree()[0].id.clone();

    let copy = session
        .apply(Mutation::DuplicateComponent { node_id: section.clone() })
        .unwrap()
        .selected_id
        .unwrap();
    let copy_heading = session.page().find(&copy).unwrap().children().unwrap()[0].id.clone();

    session
        .apply(Mutation::UpdateProps {
            node_id: copy_heading.clone(),
            props: props(json!({ "text": "Second fold" })),
        })
        .unwrap();

    let original_heading = &session.tree()[0].children().unwrap()[0];
    assert_ne!(original_heading.prop_str("text"), Some("Second fold"));
    assert_eq!(
        session.page().find(&copy_heading).unwrap().prop_str("text"),
        Some("Second fold")
    );
    assert!(tree::validate(session.tree()).is_ok());
}

#[test]
fn test_rejected_move_keeps_tree() {
    let mut session = session();
    let section = session.tree()[0].id.clone();
    let columns = add(&mut session, ComponentType::Columns, Placement::inside(&section));
    let before = session.page().clone();
    let version = session.version();

    let result = session.apply(Mutation::MoveComponent {
        node_id: section.clone(),
        placement: Placement::in_column(&columns, 0),
    });

    assert!(result.is_err());
    assert_eq!(session.page(), &before);
    assert_eq!(session.version(), version);
}
