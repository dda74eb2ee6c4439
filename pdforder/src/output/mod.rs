//! Output formatting and display for pdforder.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - The computed merge order and the stored priority rules
//! - Merge summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdforder::output::OutputFormatter;
//! use pdforder::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;
use crate::ordering::{FileEntry, OrderingRules};

/// Describe why an entry sits where it does in the order.
///
/// Used for the verbose listing: `intro1.pdf [intro, 1]`.
pub fn describe_entry(entry: &FileEntry, rules: &OrderingRules) -> String {
    let bucket = rules.keyword_order.bucket_of(entry.stem());
    let keyword = rules.keyword_order.get(bucket).unwrap_or("no keyword");
    format!("{entry} [{keyword}, {}]", entry.number())
}

/// Print entries in merge order.
///
/// Verbose mode adds the matched keyword and number of every entry.
pub fn display_order(formatter: &OutputFormatter, ordered: &[FileEntry], rules: &OrderingRules) {
    if ordered.is_empty() {
        formatter.warning("No files");
        return;
    }

    formatter.debug(&format!(
        "{} keyword(s), numbers {}",
        rules.keyword_order.len(),
        rules.numeric_sort
    ));

    for (index, entry) in ordered.iter().enumerate() {
        let line = if formatter.is_verbose() {
            describe_entry(entry, rules)
        } else {
            entry.to_string()
        };
        formatter.list_item(index + 1, &line);
    }
}

/// Print the stored priority rules with 1-based positions.
pub fn display_rules(formatter: &OutputFormatter, rules: &OrderingRules) {
    if rules.keyword_order.is_empty() {
        formatter.info("No priority keywords defined");
    } else {
        for (index, keyword) in rules.keyword_order.iter().enumerate() {
            formatter.list_item(index + 1, keyword);
        }
    }
    formatter.info(&format!("Numeric sort: {}", rules.numeric_sort));
}

/// Print details of a completed merge. Verbose mode only.
pub fn display_merge_statistics(
    formatter: &OutputFormatter,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.detail("Pages", &merge.total_pages.to_string());
    if merge.files_skipped > 0 {
        formatter.detail("Skipped", &merge.files_skipped.to_string());
    }
    formatter.detail("Input size", &merge.format_input_size());
    formatter.detail("Output size", &write.format_file_size());
    formatter.detail(
        "Time",
        &format!(
            "{:.2}s (load {:.2}s, write {:.2}s)",
            merge.merge_time.as_secs_f64(),
            merge.load_time.as_secs_f64(),
            write.write_time.as_secs_f64()
        ),
    );
}
