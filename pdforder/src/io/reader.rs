//! PDF reading and loading operations.
//!
//! Loads documents on tokio's blocking pool, optionally in parallel, and
//! always hands results back in the order the paths were given. The merge
//! order is decided before loading starts, so the reader must not reorder.
//!
//! # Examples
//!
//! ```no_run
//! use pdforder::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! println!("Loaded {} files", stats.success_count);
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOrderError, Result};
use crate::io::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut stats = Self {
            success_count: 0,
            failure_count: 0,
            total_time,
            total_size: 0,
            total_pages: 0,
        };

        for result in results {
            match result {
                Ok(loaded) => {
                    stats.success_count += 1;
                    stats.total_size += loaded.file_size;
                    stats.total_pages += loaded.page_count;
                }
                Err(_) => stats.failure_count += 1,
            }
        }

        stats
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader that loads documents on the blocking pool.
///
/// Documents without pages are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a file
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        check_path_exists(path).await?;

        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || {
            let start = Instant::now();

            let document = Document::load(&path_buf).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfOrderError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfOrderError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

            let page_count = document.get_pages().len();
            if page_count == 0 {
                return Err(PdfOrderError::corrupted_pdf(path_buf, "PDF has no pages"));
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);
            let load_time = start.elapsed();

            tracing::debug!(
                path = %path_buf.display(),
                pages = page_count,
                elapsed_ms = load_time.as_millis() as u64,
                "Loaded PDF"
            );

            Ok(LoadedPdf {
                document,
                path: path_buf,
                page_count,
                load_time,
                file_size,
            })
        })
        .await?
    }

    /// Load multiple PDF documents one at a time.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.load(path).await);
        }
        results
    }

    /// Load multiple PDF documents with up to `workers` loads in flight.
    ///
    /// Results come back in the same order as `paths`.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        let reader = *self;
        stream::iter(paths)
            .map(|path| async move { reader.load(path).await })
            .buffered(workers.max(1))
            .collect()
            .await
    }

    /// Load all PDFs, choosing sequential loading for small batches.
    ///
    /// Returns the per-file results in input order plus aggregate statistics.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if paths.len() <= 3 || max_workers <= 1 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let stats = LoadStatistics::from_results(&results, start.elapsed());
        (results, stats)
    }
}

async fn check_path_exists(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(PdfOrderError::not_a_file(path.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(PdfOrderError::file_not_found(path.to_path_buf()))
        }
        Err(source) => Err(PdfOrderError::FileNotAccessible {
            path: path.to_path_buf(),
            source,
        }),
    }
}
