//! I/O operations for pdforder.
//!
//! This module handles loading input PDFs and writing the merged document.
//! `lopdf` is synchronous, so both directions run their document work on
//! tokio's blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use pdforder::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("input.pdf")).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(&loaded.document, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
