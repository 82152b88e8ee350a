/// Integration tests for the save/publish pipeline
/// Tests session → synchronizer → store → public view
use pagesmith_editor::{
    Bounds, ComponentType, DragController, DragPayload, DropTarget, Mutation, Placement,
};
use pagesmith_workspace::{
    DocumentStore, JsonFileStore, MemoryStore, PageSync, PublicPageView, PublicView, SyncError,
    PAGES, PUBLISHED_PAGES,
};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_edit_publish_view_roundtrip() {
    let store = Arc::new(MemoryStore::new());
    let sync = PageSync::new(store.clone());
    let view = PublicPageView::new(store.clone());

    sync.create_default_page("page-1", "user-1").await.unwrap();
    let mut session = sync.open_session("page-1", "user-1", "tab-1").await.unwrap();

    let section = session.tree()[0].id.clone();
    session
        .apply(Mutation::AddComponent {
            component_type: ComponentType::Columns,
            placement: Placement::inside(&section),
        })
        .unwrap();
    session
        .apply(Mutation::SetPublished { published: true })
        .unwrap();

    let receipt = sync.save_session(&mut session).await.unwrap();
    assert!(receipt.published);
    assert!(!session.is_dirty());

    let public = match view.resolve("page-1").await.unwrap() {
        PublicView::Found(page) => page,
        PublicView::NotFound => panic!("Expected published page"),
    };
    assert_eq!(public.content, session.page().content);
    assert_eq!(public.content[0].children().unwrap().len(), 4);

    // Unpublish removes the public record in the same save
    session
        .apply(Mutation::SetPublished { published: false })
        .unwrap();
    sync.save_session(&mut session).await.unwrap();

    assert_eq!(view.resolve("page-1").await.unwrap(), PublicView::NotFound);
    assert_eq!(store.document_count(PAGES).await, 1);
    assert_eq!(store.document_count(PUBLISHED_PAGES).await, 0);
}

#[tokio::test]
async fn test_outage_during_save_is_recoverable() {
    let store = Arc::new(MemoryStore::new());
    let sync = PageSync::new(store.clone());

    sync.create_default_page("page-1", "user-1").await.unwrap();
    let mut session = sync.open_session("page-1", "user-1", "tab-1").await.unwrap();
    session
        .apply(Mutation::RenamePage { name: "Spring Sale".into() })
        .unwrap();

    store.set_unavailable(true).await;
    assert!(matches!(
        sync.save_session(&mut session).await,
        Err(SyncError::Store(_))
    ));
    assert!(session.is_dirty());

    // Editing continues after the failure
    session
        .apply(Mutation::SetBackgroundColor { color: "#fef3c7".into() })
        .unwrap();

    store.set_unavailable(false).await;
    sync.save_session(&mut session).await.unwrap();
    assert!(!session.is_dirty());

    let stored = sync.load_for_editing("page-1", "user-1").await.unwrap();
    assert_eq!(stored.page_name, "Spring Sale");
    assert_eq!(stored.page_background_color, "#fef3c7");
}

#[tokio::test]
async fn test_drag_drop_then_save_to_file_store() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(dir.path()));
    let sync = PageSync::new(store.clone());

    sync.create_default_page("page-1", "user-1").await.unwrap();
    let mut session = sync.open_session("page-1", "user-1", "tab-1").await.unwrap();
    let section = session.tree()[0].id.clone();
    let heading = session.tree()[0].children().unwrap()[0].id.clone();

    let mut drag = DragController::new();
    drag.drag_start(DragPayload::new_component(ComponentType::Button));
    drag.drag_over(
        DropTarget::node(&heading, Some(section.clone()), None),
        0.0,
        Bounds::new(0.0, 40.0),
    );
    drag.drop_on(&mut session).unwrap().unwrap();

    sync.save_session(&mut session).await.unwrap();

    let reloaded = PageSync::new(Arc::new(JsonFileStore::new(dir.path())))
        .load_for_editing("page-1", "user-1")
        .await
        .unwrap();
    let children = reloaded.content[0].children().unwrap();
    assert_eq!(children.len(), 4);
    assert_eq!(children[0].component_type, ComponentType::Button);
    assert_eq!(children[1].id, heading);
}

#[tokio::test]
async fn test_other_user_cannot_open_session() {
    let store = Arc::new(MemoryStore::new());
    let sync = PageSync::new(store);

    sync.create_default_page("page-1", "user-1").await.unwrap();

    assert!(matches!(
        sync.open_session("page-1", "user-2", "tab-9").await,
        Err(SyncError::AccessDenied { .. })
    ));
}
