//! Rules persisted on disk drive the order of a later run.

use pdforder::ordering::{SortDirection, order_paths};
use pdforder::store::RulesStore;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_edited_rules_change_the_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = RulesStore::new(temp_dir.path().join("priority_config.json"));

    store
        .update(|rules| {
            rules.keyword_order.add("chapter");
            rules.keyword_order.add("intro");
            Ok(())
        })
        .await
        .unwrap();

    let files = ["intro1.pdf", "chapter2.pdf"];
    let rules = store.load().await.unwrap();
    assert_eq!(
        order_paths(&rules, files),
        [PathBuf::from("chapter2.pdf"), PathBuf::from("intro1.pdf")]
    );

    store
        .update(|rules| {
            rules.keyword_order.move_up(1);
            Ok(())
        })
        .await
        .unwrap();

    let rules = store.load().await.unwrap();
    assert_eq!(
        order_paths(&rules, files),
        [PathBuf::from("intro1.pdf"), PathBuf::from("chapter2.pdf")]
    );
}

#[tokio::test]
async fn test_hand_written_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("priority_config.json");
    std::fs::write(
        &path,
        r#"{"keyword_order": ["intro", "chapter"], "numeric_sort": "desc"}"#,
    )
    .unwrap();

    let rules = RulesStore::new(&path).load().await.unwrap();
    assert_eq!(rules.numeric_sort, SortDirection::Descending);
    assert_eq!(
        order_paths(&rules, ["chapter2.pdf", "chapter10.pdf"]),
        [PathBuf::from("chapter10.pdf"), PathBuf::from("chapter2.pdf")]
    );
}

#[tokio::test]
async fn test_unknown_direction_falls_back_to_ascending() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("priority_config.json");
    std::fs::write(&path, r#"{"keyword_order": [], "numeric_sort": "sideways"}"#).unwrap();

    let rules = RulesStore::new(&path).load().await.unwrap();
    assert_eq!(rules.numeric_sort, SortDirection::Ascending);
    assert_eq!(
        order_paths(&rules, ["b2.pdf", "a10.pdf", "a2.pdf"]),
        [
            PathBuf::from("a2.pdf"),
            PathBuf::from("b2.pdf"),
            PathBuf::from("a10.pdf")
        ]
    );
}

#[tokio::test]
async fn test_saved_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let store = RulesStore::new(temp_dir.path().join("priority_config.json"));

    store
        .update(|rules| {
            rules.keyword_order.add("intro");
            rules.numeric_sort = SortDirection::Descending;
            Ok(())
        })
        .await
        .unwrap();

    let saved = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["keyword_order"], serde_json::json!(["intro"]));
    assert_eq!(json["numeric_sort"], "desc");
}
