//! End-to-end ordered merges: discover, order, merge, write, reload.

use lopdf::Document;
use pdforder::config::{CompressionLevel, Config, OverwriteMode};
use pdforder::discovery::Discovery;
use pdforder::io::PdfWriter;
use pdforder::merge::Merger;
use pdforder::ordering::{OrderingRules, PriorityList, SortDirection};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{file_names, page_widths, write_pdf};

fn rules(keywords: &[&str], direction: SortDirection) -> OrderingRules {
    let priorities: PriorityList = keywords.iter().copied().collect();
    OrderingRules::new(priorities, direction)
}

/// Folder with one single-page PDF per stem; page width encodes the number.
fn book_folder(temp_dir: &TempDir) -> std::path::PathBuf {
    let folder = temp_dir.path().join("book");
    write_pdf(&folder, "chapter2.pdf", 1, 2);
    write_pdf(&folder, "intro1.pdf", 1, 1);
    write_pdf(&folder, "appendix9.pdf", 1, 9);
    write_pdf(&folder, "chapter10.pdf", 1, 10);
    folder
}

async fn merge_folder(temp_dir: &TempDir, rules: OrderingRules) -> (Vec<String>, Vec<i64>) {
    let folder = book_folder(temp_dir);
    let inputs = Discovery::new().collect([&folder]).unwrap();

    let mut config = Config::new(inputs, temp_dir.path().join("merged_output.pdf"));
    config.rules = rules;
    config.overwrite_mode = OverwriteMode::Force;
    config.quiet = true;

    let result = Merger::new().merge(&config).await.unwrap();
    PdfWriter::new()
        .save(&result.document, &config.output)
        .await
        .unwrap();

    let written = Document::load(&config.output).unwrap();
    (file_names(&result.merged_files), page_widths(&written))
}

#[tokio::test]
async fn test_folder_merge_in_priority_order() {
    let temp_dir = TempDir::new().unwrap();

    let (names, widths) =
        merge_folder(&temp_dir, rules(&["intro", "chapter"], SortDirection::Ascending)).await;

    assert_eq!(
        names,
        ["intro1.pdf", "chapter2.pdf", "chapter10.pdf", "appendix9.pdf"]
    );
    assert_eq!(widths, [1, 2, 10, 9]);
}

#[tokio::test]
async fn test_folder_merge_descending_numbers() {
    let temp_dir = TempDir::new().unwrap();

    let (_, widths) =
        merge_folder(&temp_dir, rules(&["intro", "chapter"], SortDirection::Descending)).await;

    // Buckets still ascend; only numbers within a bucket flip.
    assert_eq!(widths, [1, 10, 2, 9]);
}

#[tokio::test]
async fn test_folder_merge_without_keywords() {
    let temp_dir = TempDir::new().unwrap();

    let (_, widths) = merge_folder(&temp_dir, OrderingRules::default()).await;

    assert_eq!(widths, [1, 2, 9, 10]);
}

#[rstest]
#[case::none(CompressionLevel::None)]
#[case::standard(CompressionLevel::Standard)]
#[case::maximum(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_multi_page_documents_stay_together(#[case] compression: CompressionLevel) {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        write_pdf(temp_dir.path(), "part2.pdf", 2, 200),
        write_pdf(temp_dir.path(), "part1.pdf", 3, 100),
    ];

    let mut config = Config::new(inputs, temp_dir.path().join("out.pdf"));
    config.compression = compression;

    let result = Merger::new().merge(&config).await.unwrap();
    PdfWriter::new()
        .save(&result.document, &config.output)
        .await
        .unwrap();

    let written = Document::load(&config.output).unwrap();
    assert_eq!(page_widths(&written), [100, 100, 100, 200, 200]);
    assert_eq!(result.statistics.total_pages, 5);
}

#[tokio::test]
async fn test_recursive_discovery_with_exclude() {
    let temp_dir = TempDir::new().unwrap();
    write_pdf(temp_dir.path(), "scans/page3.pdf", 1, 3);
    write_pdf(temp_dir.path(), "scans/more/page1.pdf", 1, 1);
    write_pdf(temp_dir.path(), "scans/more/draft2.pdf", 1, 2);

    let inputs = Discovery::new()
        .recursive(true)
        .exclude(["draft*"])
        .unwrap()
        .collect([temp_dir.path().join("scans")])
        .unwrap();

    let config = Config::new(inputs, temp_dir.path().join("out.pdf"));
    let result = Merger::new().merge(&config).await.unwrap();

    assert_eq!(file_names(&result.merged_files), ["page1.pdf", "page3.pdf"]);
    assert_eq!(page_widths(&result.document), [1, 3]);
}

#[tokio::test]
async fn test_parallel_loading_keeps_merge_order() {
    let temp_dir = TempDir::new().unwrap();
    let inputs: Vec<_> = (1..=8)
        .rev()
        .map(|i| write_pdf(temp_dir.path(), &format!("scan{i}.pdf"), 1, i))
        .collect();

    let mut config = Config::new(inputs, temp_dir.path().join("out.pdf"));
    config.jobs = Some(4);

    let result = Merger::new().merge(&config).await.unwrap();
    assert_eq!(page_widths(&result.document), [1, 2, 3, 4, 5, 6, 7, 8]);
}
