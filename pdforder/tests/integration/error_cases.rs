//! Failure paths of discovery, merging and writing.

use pdforder::config::Config;
use pdforder::discovery::Discovery;
use pdforder::error::PdfOrderError;
use pdforder::merge::Merger;
use pdforder::store::RulesStore;
use tempfile::TempDir;

use crate::common::write_pdf;

#[tokio::test]
async fn test_empty_folder_has_nothing_to_merge() {
    let temp_dir = TempDir::new().unwrap();

    let inputs = Discovery::new().collect([temp_dir.path()]).unwrap();
    assert!(inputs.is_empty());

    let config = Config::new(inputs, temp_dir.path().join("out.pdf"));
    let result = Merger::new().merge(&config).await;
    assert!(matches!(result, Err(PdfOrderError::NoFilesToMerge)));
}

#[tokio::test]
async fn test_corrupted_input_fails_merge() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "a1.pdf", 1, 100);
    let bad = temp_dir.path().join("a2.pdf");
    std::fs::write(&bad, b"%PDF-1.4\ngarbage").unwrap();

    let config = Config::new(vec![good, bad], temp_dir.path().join("out.pdf"));
    let err = Merger::new().merge(&config).await.err().unwrap();

    assert!(err.is_recoverable());
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_continue_on_error_merges_the_rest() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "a1.pdf", 2, 100);
    let bad = temp_dir.path().join("a2.pdf");
    std::fs::write(&bad, b"%PDF-1.4\ngarbage").unwrap();

    let mut config = Config::new(vec![bad, good], temp_dir.path().join("out.pdf"));
    config.continue_on_error = true;

    let result = Merger::new().merge(&config).await.unwrap();
    assert_eq!(result.statistics.files_merged, 1);
    assert_eq!(result.statistics.files_skipped, 1);
    assert_eq!(result.statistics.total_pages, 2);
}

#[tokio::test]
async fn test_missing_input_is_not_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "a1.pdf", 1, 100);

    let mut config = Config::new(
        vec![good, temp_dir.path().join("gone.pdf")],
        temp_dir.path().join("out.pdf"),
    );
    config.continue_on_error = true;

    let result = Merger::new().merge(&config).await;
    assert!(matches!(result, Err(PdfOrderError::FileNotFound { .. })));
}

#[test]
fn test_unmatched_pattern_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = temp_dir.path().join("chapter*.pdf");

    let result = Discovery::new().collect([pattern]);
    assert!(matches!(result, Err(PdfOrderError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_malformed_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("priority_config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = RulesStore::new(&path).load().await;
    assert!(matches!(
        result,
        Err(PdfOrderError::FailedToLoadRules { .. })
    ));
}
