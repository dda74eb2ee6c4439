//! Priority-driven file ordering.
//!
//! Files are ordered by a key derived from their stem:
//!
//! 1. the **bucket**: index of the first keyword in the priority list that
//!    occurs in the stem, or the list length when none does;
//! 2. the first run of digits in the stem (0 when absent), compared by value
//!    and reversed when the direction is descending;
//! 3. the lowercased stem.
//!
//! The computation is pure: inputs are borrowed read-only and a new ordered
//! sequence is returned. Entries with equal keys keep their input order.
//!
//! # Examples
//!
//! ```
//! use pdforder::ordering::{compute_order, FileEntry, PriorityList, SortDirection};
//!
//! let priorities: PriorityList = ["intro", "chapter"].into_iter().collect();
//! let entries: Vec<FileEntry> = ["chapter2.pdf", "intro1.pdf", "appendix9.pdf", "chapter10.pdf"]
//!     .into_iter()
//!     .map(FileEntry::from)
//!     .collect();
//!
//! let ordered = compute_order(&priorities, SortDirection::Ascending, &entries);
//! let stems: Vec<&str> = ordered.iter().map(FileEntry::stem).collect();
//! assert_eq!(stems, ["intro1", "chapter2", "chapter10", "appendix9"]);
//! ```

mod key;
mod rules;

pub use key::{FileEntry, NumberKey, SortKey, StemNumber};
pub use rules::{OrderingRules, PriorityList, SortDirection};

use std::path::PathBuf;

/// Order `entries` by keyword priority, number and name.
///
/// Returns a permutation of `entries`; the input slice is left untouched.
pub fn compute_order(
    priorities: &PriorityList,
    direction: SortDirection,
    entries: &[FileEntry],
) -> Vec<FileEntry> {
    let mut ordered = entries.to_vec();
    // Stable: identical keys keep their input order.
    ordered.sort_by_cached_key(|entry| entry.sort_key(priorities, direction));

    tracing::debug!(
        entries = ordered.len(),
        keywords = priorities.len(),
        %direction,
        "Computed merge order"
    );

    ordered
}

/// Order plain paths according to `rules`.
pub fn order_paths<I>(rules: &OrderingRules, paths: I) -> Vec<PathBuf>
where
    I: IntoIterator,
    I::Item: Into<PathBuf>,
{
    let entries: Vec<FileEntry> = paths.into_iter().map(FileEntry::new).collect();
    compute_order(&rules.keyword_order, rules.numeric_sort, &entries)
        .into_iter()
        .map(FileEntry::into_path)
        .collect()
}
