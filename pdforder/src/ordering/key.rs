//! File entries and the sort key derived from them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::path::{Path, PathBuf};

use super::rules::{PriorityList, SortDirection};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// A file presented for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    path: PathBuf,
    stem: String,
}

impl FileEntry {
    /// Create an entry, deriving the stem from the file name.
    ///
    /// The stem is the file name without its final extension
    /// (`report.v2.pdf` → `report.v2`). Paths without a file name get an
    /// empty stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stem used for matching and display.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Consume the entry and return its path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// The first run of ASCII digits in the stem, or 0.
    pub fn number(&self) -> StemNumber {
        StemNumber::from_stem(&self.stem)
    }

    /// Derive the sort key for this entry under the given rules.
    pub fn sort_key(&self, priorities: &PriorityList, direction: SortDirection) -> SortKey {
        let number = self.number();
        SortKey {
            bucket: priorities.bucket_of(&self.stem),
            number: match direction {
                SortDirection::Ascending => NumberKey::Ascending(number),
                SortDirection::Descending => NumberKey::Descending(Reverse(number)),
            },
            folded_stem: self.stem.to_lowercase(),
        }
    }
}

impl From<PathBuf> for FileEntry {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FileEntry {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileEntry {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// A non-negative integer of any length taken from a stem.
///
/// Stored as its decimal digits without leading zeros, so two numbers compare
/// by digit count first and then digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StemNumber {
    digits: String,
}

impl StemNumber {
    /// The first run of ASCII digits in `stem`, or zero when there is none.
    pub fn from_stem(stem: &str) -> Self {
        let run = DIGIT_RUN.find(stem).map_or("", |run| run.as_str());
        let digits = run.trim_start_matches('0');
        Self {
            digits: if digits.is_empty() { "0" } else { digits }.to_string(),
        }
    }

    /// Decimal digits of the number.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl Ord for StemNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for StemNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// The numeric component of a [`SortKey`], ordered by the sort direction.
///
/// Keys built under different directions are never compared with each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKey {
    /// Smaller numbers sort first.
    Ascending(StemNumber),
    /// Larger numbers sort first.
    Descending(Reverse<StemNumber>),
}

/// Sort key of one entry: `(bucket, directed number, lowercased stem)`.
///
/// Field order matters: the derived `Ord` compares lexicographically in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    /// Index of the first matching keyword, or the overflow bucket.
    pub bucket: usize,
    /// Extracted number, reversed for descending order.
    pub number: NumberKey,
    /// Stem in lowercase, the final tiebreaker.
    pub folded_stem: String,
}
