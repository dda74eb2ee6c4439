//! Input discovery: turning folders, glob patterns and list files into the
//! set of PDF paths to order.
//!
//! Discovery only decides *which* files take part. The order they come out in
//! is irrelevant; [`crate::ordering`] decides that afterwards.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PdfOrderError, Result};

/// Collects PDF paths from command-line style inputs.
#[derive(Debug, Clone)]
pub struct Discovery {
    recursive: bool,
    excludes: GlobSet,
}

impl Discovery {
    /// Discovery without recursion or exclusions.
    pub fn new() -> Self {
        Self {
            recursive: false,
            excludes: GlobSet::empty(),
        }
    }

    /// Descend into subdirectories of folder inputs.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Skip paths matching any of `patterns`.
    ///
    /// Patterns are matched against the full path and against the file name,
    /// so `draft*` excludes `docs/draft1.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOrderError::InvalidPattern`] for a malformed pattern.
    pub fn exclude<I>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern)
                .map_err(|err| PdfOrderError::invalid_pattern(pattern, err.to_string()))?;
            builder.add(glob);
        }
        self.excludes = builder
            .build()
            .map_err(|err| PdfOrderError::invalid_pattern("<exclude set>", err.to_string()))?;
        Ok(self)
    }

    /// Resolve every input into file paths.
    ///
    /// - A directory expands to the `.pdf` files inside it (all levels when
    ///   recursive).
    /// - An existing file is taken as is.
    /// - Anything else is treated as a glob pattern; a pattern matching
    ///   nothing is reported as [`PdfOrderError::FileNotFound`].
    ///
    /// Duplicates are removed, keeping the first occurrence.
    pub fn collect<I>(&self, inputs: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut resolved = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                resolved.extend(self.collect_dir(input)?);
            } else if input.is_file() {
                resolved.push(input.to_path_buf());
            } else {
                let matches = collect_paths_for_pattern(&input.to_string_lossy())?;
                if matches.is_empty() {
                    return Err(PdfOrderError::file_not_found(input.to_path_buf()));
                }
                resolved.extend(matches);
            }
        }

        let before = resolved.len();
        let resolved: Vec<PathBuf> = dedup_paths(resolved)
            .into_iter()
            .filter(|path| !self.is_excluded(path))
            .collect();

        tracing::debug!(
            found = before,
            kept = resolved.len(),
            recursive = self.recursive,
            "Discovered input files"
        );

        Ok(resolved)
    }

    fn collect_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.recursive {
            let escaped = glob::Pattern::escape(&dir.to_string_lossy());
            return collect_paths_for_pattern(&format!("{escaped}/*.pdf"));
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| PdfOrderError::FileNotAccessible {
                path: err.path().unwrap_or(dir).to_path_buf(),
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            })?;
            if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }
        self.excludes.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| self.excludes.is_match(name))
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove repeated paths, keeping the first occurrence of each.
pub fn dedup_paths<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Read input paths from a list file.
///
/// One path per line. Lines starting with `#` are comments; blank lines are
/// skipped; surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`PdfOrderError::FailedToReadInputList`] if the file cannot be
/// read.
pub async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        PdfOrderError::FailedToReadInputList {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"./docs/*.pdf"`
/// - `"chapter*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|err| PdfOrderError::invalid_pattern(pattern, err.to_string()))?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry?;
        if path.is_file() {
            resolved_paths.push(path);
        }
    }

    Ok(resolved_paths)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
