//! PDF writing and saving operations.
//!
//! Writes go to a sibling temporary file first and are renamed into place, so
//! a failed merge never leaves a truncated output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdforder::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOrderError, Result};
use crate::io::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that writes straight to the destination.
    pub fn non_atomic() -> Self {
        Self::with_options(WriteOptions {
            atomic: false,
            ..Default::default()
        })
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the output (or its directory) cannot be created or
    /// written.
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// Missing parent directories are created.
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        // lopdf serializes through &mut self
        let mut doc = doc.clone();

        task::spawn_blocking(move || {
            let start = Instant::now();

            if let Some(parent) = path_buf.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|source| {
                    PdfOrderError::FailedToCreateOutput {
                        path: path_buf.clone(),
                        source,
                    }
                })?;
            }

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|source| {
                PdfOrderError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            let written = doc
                .save_to(&mut writer)
                .and_then(|_| writer.flush().map_err(Into::into));
            if let Err(e) = written {
                if options.atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(PdfOrderError::FailedToWrite {
                    path: write_path,
                    source: std::io::Error::other(e.to_string()),
                });
            }
            drop(writer);

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|source| {
                    PdfOrderError::FailedToWrite {
                        path: path_buf.clone(),
                        source,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);
            let write_time = start.elapsed();

            tracing::info!(
                path = %path_buf.display(),
                bytes = file_size,
                "Wrote merged PDF"
            );

            Ok(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
            })
        })
        .await?
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
