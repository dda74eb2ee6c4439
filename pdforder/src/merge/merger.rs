//! Core ordered-merge implementation.
//!
//! The merge order is fixed before anything is loaded: [`Config::ordered_inputs`]
//! applies the priority rules, the reader keeps that order, and documents are
//! appended one after the other.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{CompressionLevel, Config};
use crate::error::{PdfOrderError, Result};
use crate::io::{LoadedPdf, PdfReader, format_file_size};

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Number of inputs skipped because they could not be loaded.
    pub files_skipped: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that concatenates documents in priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order, load and concatenate the inputs of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input cannot be loaded (unless `continue_on_error` is set and the
    ///   failure is recoverable)
    /// - Nothing is left to merge
    /// - The page trees cannot be combined
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdforder::merge::Merger;
    /// # use pdforder::config::Config;
    /// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Merger::new().merge(&config).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, config: &Config) -> Result<MergeResult> {
        let merge_start = Instant::now();
        let ordered = config.ordered_inputs();

        if ordered.is_empty() {
            return Err(PdfOrderError::NoFilesToMerge);
        }

        let load_start = Instant::now();
        let (load_results, load_stats) = self
            .reader
            .load_all(&ordered, config.effective_jobs())
            .await;
        let load_time = load_start.elapsed();

        let mut loaded_pdfs = Vec::with_capacity(load_results.len());
        let mut files_skipped = 0;
        for result in load_results {
            match result {
                Ok(loaded) => loaded_pdfs.push(loaded),
                Err(err) if config.continue_on_error && err.is_recoverable() => {
                    tracing::warn!("Skipping file: {err}");
                    files_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if loaded_pdfs.is_empty() {
            return Err(PdfOrderError::NoFilesToMerge);
        }

        let merged_files: Vec<PathBuf> = loaded_pdfs.iter().map(|p| p.path.clone()).collect();
        let files_merged = loaded_pdfs.len();

        let mut document = concatenate(loaded_pdfs)?;
        apply_compression(&mut document, config.compression);

        let statistics = MergeStatistics {
            files_merged,
            files_skipped,
            total_pages: document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: load_stats.total_size,
            compressed: config.compression != CompressionLevel::None,
        };

        tracing::info!(
            files = statistics.files_merged,
            skipped = statistics.files_skipped,
            pages = statistics.total_pages,
            "Merged documents"
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }
}

/// Append every document's page tree under one new root, in order.
///
/// Each source page tree is kept whole and becomes a child of the merged
/// root, so attributes inherited from intermediate nodes survive.
fn concatenate(loaded_pdfs: Vec<LoadedPdf>) -> Result<Document> {
    let version = loaded_pdfs
        .iter()
        .map(|p| p.document.version.as_str())
        .max()
        .unwrap_or("1.5")
        .to_string();

    let mut merged = Document::with_version(version);
    let pages_id = merged.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(loaded_pdfs.len());
    let mut page_count: i64 = 0;

    for loaded in loaded_pdfs {
        let mut doc = loaded.document;
        doc.renumber_objects_with(merged.max_id + 1);
        merged.max_id = doc.max_id;

        let (catalog_id, tree_root) = page_tree_root(&doc).map_err(|reason| {
            PdfOrderError::merge_failed(format!("{}: {reason}", loaded.path.display()))
        })?;

        doc.get_object_mut(tree_root)
            .and_then(Object::as_dict_mut)?
            .set("Parent", pages_id);
        doc.objects.remove(&catalog_id);

        kids.push(tree_root.into());
        page_count += loaded.page_count as i64;
        merged.objects.extend(doc.objects);
    }

    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);

    Ok(merged)
}

/// Catalog id and page tree root of a document.
fn page_tree_root(doc: &Document) -> std::result::Result<(ObjectId, ObjectId), String> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| format!("missing document catalog ({e})"))?;
    let tree_root = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| format!("missing page tree ({e})"))?;
    Ok((catalog_id, tree_root))
}

fn apply_compression(document: &mut Document, level: CompressionLevel) {
    match level {
        CompressionLevel::None => {}
        CompressionLevel::Standard => document.compress(),
        CompressionLevel::Maximum => {
            document.compress();
            document.prune_objects();
        }
    }

    // Dense object ids after merging.
    document.renumber_objects();
}
