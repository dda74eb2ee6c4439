//! PDF merging in priority order.
//!
//! [`Merger`] resolves the merge order from the run's [`crate::Config`],
//! loads the inputs and appends their page trees to one document. Writing the
//! result is left to [`crate::io::PdfWriter`].

mod merger;

pub use merger::{MergeResult, MergeStatistics, Merger};
