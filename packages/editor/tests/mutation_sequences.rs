//! Mutation sequences: undo/redo reproduction and history bounds

use std::sync::Arc;

use pagecraft_editor::{EditorConfig, EditorStore, Mutation};
use pagecraft_model::{TemplateDocument, ThemeTokensPatch};
use pagecraft_schema::SchemaRegistry;
use pagecraft_storage::{MemoryDriver, StorageService};
use serde_json::json;

async fn loaded_store(history_limit: usize) -> EditorStore {
    let config = EditorConfig {
        history_limit,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::with_config(
        Arc::new(SchemaRegistry::builtin()),
        StorageService::new(Arc::new(MemoryDriver::new())),
        config,
    );
    store.load("home").await.unwrap();
    store
}

fn sequence() -> Vec<Mutation> {
    serde_json::from_value(json!([
        { "type": "addSection", "sectionType": "hero", "after": "hero-1" },
        { "type": "updateSectionSettings", "sectionId": "hero-2", "settings": { "title": "Second" } },
        { "type": "moveSectionDown", "sectionId": "hero-1" },
        { "type": "addBlock", "sectionId": "cards-1", "blockType": "feature_card" },
        { "type": "updateBlockSettings", "sectionId": "cards-1", "blockId": "card-1", "settings": { "title": "Web" } },
        { "type": "duplicateBlock", "sectionId": "cards-1", "blockId": "card-2" },
        { "type": "reorderSections", "sectionIds": ["cta-1", "hero-2", "hero-1", "rich-text-1", "cards-1"] },
        { "type": "updateThemeTokens", "patch": { "radius": "12px" } },
        { "type": "setRtl", "enabled": true },
        { "type": "removeSection", "sectionId": "rich-text-1" }
    ]))
    .unwrap()
}

#[tokio::test]
async fn test_undo_k_then_redo_k_reproduces_state() {
    let mut store = loaded_store(50).await;
    let mut states: Vec<TemplateDocument> = vec![store.document().unwrap().clone()];

    for mutation in sequence() {
        let result = store.apply(mutation).unwrap();
        assert!(result.changed);
        states.push(store.document().unwrap().clone());
    }

    for k in 1..states.len() {
        for _ in 0..k {
            assert!(store.undo());
        }
        assert_eq!(store.document().unwrap(), &states[states.len() - 1 - k]);

        for _ in 0..k {
            assert!(store.redo());
        }
        assert_eq!(store.document().unwrap(), states.last().unwrap());
    }
}

#[tokio::test]
async fn test_undo_all_returns_to_loaded_document() {
    let mut store = loaded_store(50).await;
    let loaded = store.document().unwrap().clone();

    for mutation in sequence() {
        store.apply(mutation).unwrap();
    }
    while store.undo() {}

    assert_eq!(store.document().unwrap(), &loaded);
    assert!(store.selection().is_empty());
}

#[tokio::test]
async fn test_mutation_after_undo_discards_redo() {
    let mut store = loaded_store(50).await;
    for mutation in sequence().into_iter().take(3) {
        store.apply(mutation).unwrap();
    }

    store.undo();
    store.undo();
    assert!(store.can_redo());

    store
        .update_theme_tokens(ThemeTokensPatch {
            dark_mode: Some(true),
            ..ThemeTokensPatch::default()
        })
        .unwrap();
    assert!(!store.can_redo());
    assert_eq!(store.history().undo_description(), Some("Update theme settings"));
}

#[tokio::test]
async fn test_history_is_bounded() {
    let mut store = loaded_store(5).await;
    for i in 0..20 {
        store
            .update_section_settings("hero-1", [("title".to_string(), json!(format!("Title {}", i)))].into())
            .unwrap();
    }

    assert_eq!(store.history().len(), 5);
    let mut undone = 0;
    while store.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);
    assert_eq!(store.document().unwrap().section("hero-1").unwrap().setting_str("title"), Some("Title 15"));
}

#[tokio::test]
async fn test_edge_moves_do_not_record_history() {
    let mut store = loaded_store(50).await;

    let result = store
        .apply(Mutation::MoveSectionUp {
            section_id: "hero-1".to_string(),
        })
        .unwrap();

    assert!(!result.changed);
    assert!(!store.can_undo());
    assert!(!store.is_dirty());
}

#[tokio::test]
async fn test_untouched_sections_are_shared_between_snapshots() {
    let mut store = loaded_store(50).await;
    let before = store.document().unwrap().clone();

    store
        .update_section_settings("cta-1", [("title".to_string(), json!("Call us"))].into())
        .unwrap();
    let after = store.document().unwrap();

    assert!(after.shares_section_with(&before, 0));
    assert!(after.shares_section_with(&before, 2));
    assert!(!after.shares_section_with(&before, 3));
}
