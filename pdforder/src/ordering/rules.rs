//! Ordering rules: the keyword priority list and the numeric sort direction.
//!
//! These are plain values handed to the ordering engine. Loading and saving
//! them is the job of [`crate::store::RulesStore`]; nothing here touches disk.

use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Direction in which the number extracted from a file stem is sorted.
///
/// Buckets always ascend in priority order; the direction only affects the
/// order of files that share a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smaller numbers first (`"asc"`).
    #[default]
    Ascending,
    /// Larger numbers first (`"desc"`).
    Descending,
}

impl SortDirection {
    /// The literal token used in the rules file.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Map a stored token to a direction, falling back to ascending.
    ///
    /// Used when reading the rules file, where an unrecognized token must not
    /// prevent the rules from loading. Strict parsing lives in [`FromStr`].
    pub fn normalize(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            tracing::warn!(token, "Unrecognized numeric_sort value, using \"asc\"");
            Self::Ascending
        })
    }
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    /// Parse a direction.
    ///
    /// Accepts `asc`/`ascending` and `desc`/`descending`, case-insensitively.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => bail!("Invalid sort direction: {s}. Must be one of: asc, desc"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::normalize(&token))
    }
}

/// Ordered list of filename keywords, highest priority first.
///
/// Duplicates are allowed; a stem is assigned to the first keyword it
/// contains, so later duplicates never win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityList {
    keywords: Vec<String>,
}

impl PriorityList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keywords (also the index of the overflow bucket).
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the list has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keyword at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.keywords.get(index).map(String::as_str)
    }

    /// Iterate over keywords in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// The bucket a stem falls into.
    ///
    /// This is the index of the first keyword contained in `stem`, or
    /// [`len`](Self::len) when none is. Matching is case-sensitive.
    pub fn bucket_of(&self, stem: &str) -> usize {
        self.keywords
            .iter()
            .position(|keyword| stem.contains(keyword.as_str()))
            .unwrap_or(self.keywords.len())
    }

    /// Append a keyword at the lowest priority.
    ///
    /// Any non-empty string is accepted, whitespace included. An empty
    /// keyword is ignored and `false` is returned.
    pub fn add(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    /// Remove and return the keyword at `index`.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.keywords.len()).then(|| self.keywords.remove(index))
    }

    /// Swap the keyword at `index` with the one above it.
    ///
    /// Returns the keyword's new index, or `None` when it is already first or
    /// `index` is out of range.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.keywords.len() {
            return None;
        }
        self.keywords.swap(index - 1, index);
        Some(index - 1)
    }

    /// Swap the keyword at `index` with the one below it.
    ///
    /// Returns the keyword's new index, or `None` when it is already last or
    /// `index` is out of range.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index >= self.keywords.len().saturating_sub(1) {
            return None;
        }
        self.keywords.swap(index, index + 1);
        Some(index + 1)
    }
}

impl<S: Into<String>> FromIterator<S> for PriorityList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keywords: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PriorityList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

/// Everything the ordering engine needs to know about user preferences.
///
/// Serialized as the rules file:
///
/// ```json
/// {
///   "keyword_order": ["intro", "chapter"],
///   "numeric_sort": "asc"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingRules {
    /// Keyword priorities.
    #[serde(default)]
    pub keyword_order: PriorityList,

    /// Direction for the numeric component.
    #[serde(default)]
    pub numeric_sort: SortDirection,
}

impl OrderingRules {
    /// Create rules from a keyword list and a direction.
    pub fn new(keyword_order: PriorityList, numeric_sort: SortDirection) -> Self {
        Self {
            keyword_order,
            numeric_sort,
        }
    }

    /// Same rules with a different direction.
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.numeric_sort = direction;
        self
    }
}
