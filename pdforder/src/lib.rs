//! pdforder - Merge PDF files in a keyword-priority order.
//!
//! Files are ranked by the first priority keyword their name contains, then
//! by the first number in the name (ascending or descending), then by name.
//! The ordered files are concatenated into a single document.
//!
//! # Examples
//!
//! ## Computing an order
//!
//! ```
//! use pdforder::ordering::{order_paths, OrderingRules, PriorityList, SortDirection};
//! use std::path::PathBuf;
//!
//! let priorities: PriorityList = ["cover", "chapter"].into_iter().collect();
//! let rules = OrderingRules::new(priorities, SortDirection::Ascending);
//!
//! let ordered = order_paths(&rules, ["chapter2.pdf", "notes.pdf", "cover.pdf"]);
//! assert_eq!(
//!     ordered,
//!     [
//!         PathBuf::from("cover.pdf"),
//!         PathBuf::from("chapter2.pdf"),
//!         PathBuf::from("notes.pdf"),
//!     ]
//! );
//! ```
//!
//! ## Ordered merge
//!
//! ```no_run
//! use pdforder::config::Config;
//! use pdforder::io::PdfWriter;
//! use pdforder::merge::Merger;
//! use pdforder::store::RulesStore;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new(
//!     vec![PathBuf::from("chapter2.pdf"), PathBuf::from("cover.pdf")],
//!     "merged_output.pdf",
//! );
//! config.rules = RulesStore::default().load().await?;
//!
//! let result = Merger::new().merge(&config).await?;
//! PdfWriter::new().save(&result.document, &config.output).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod merge;
pub mod ordering;
pub mod output;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfOrderError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
