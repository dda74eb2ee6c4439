//! Persistence of [`OrderingRules`] as a JSON file.
//!
//! The ordering engine never reads or writes this file itself; callers load
//! the rules once and pass the value in.

use std::path::{Path, PathBuf};

use crate::error::{PdfOrderError, Result};
use crate::ordering::OrderingRules;

/// File name used when no explicit rules path is given.
pub const DEFAULT_RULES_FILE: &str = "priority_config.json";

/// Reads and writes the rules file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesStore {
    path: PathBuf,
}

impl RulesStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the rules.
    ///
    /// A missing file yields [`OrderingRules::default`]: no keywords,
    /// ascending numbers. An unrecognized `numeric_sort` token is normalized
    /// to ascending.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOrderError::FailedToLoadRules`] if the file exists but
    /// cannot be read or is not valid JSON of the expected shape.
    pub async fn load(&self) -> Result<OrderingRules> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No rules file, using defaults");
                return Ok(OrderingRules::default());
            }
            Err(err) => {
                return Err(PdfOrderError::failed_to_load_rules(
                    self.path.clone(),
                    err.to_string(),
                ));
            }
        };

        let rules: OrderingRules = serde_json::from_str(&content).map_err(|err| {
            PdfOrderError::failed_to_load_rules(self.path.clone(), err.to_string())
        })?;

        tracing::debug!(
            path = %self.path.display(),
            keywords = rules.keyword_order.len(),
            direction = %rules.numeric_sort,
            "Loaded priority rules"
        );

        Ok(rules)
    }

    /// Save the rules, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOrderError::FailedToSaveRules`] on any I/O failure.
    pub async fn save(&self, rules: &OrderingRules) -> Result<()> {
        let to_save_error = |source: std::io::Error| PdfOrderError::FailedToSaveRules {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(to_save_error)?;
        }

        let mut json = serde_json::to_string_pretty(rules)
            .map_err(|err| to_save_error(std::io::Error::other(err)))?;
        json.push('\n');

        tokio::fs::write(&self.path, json)
            .await
            .map_err(to_save_error)?;

        tracing::info!(path = %self.path.display(), "Saved priority rules");
        Ok(())
    }

    /// Load, apply `edit`, then save.
    ///
    /// The rules are only written when `edit` succeeds. Returns whatever the
    /// closure returned.
    pub async fn update<T, F>(&self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut OrderingRules) -> Result<T>,
    {
        let mut rules = self.load().await?;
        let value = edit(&mut rules)?;
        self.save(&rules).await?;
        Ok(value)
    }
}

impl Default for RulesStore {
    fn default() -> Self {
        Self::new(DEFAULT_RULES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{PriorityList, SortDirection};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = RulesStore::new(temp_dir.path().join("absent.json"));

        let rules = store.load().await.unwrap();
        assert_eq!(rules, OrderingRules::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = RulesStore::new(temp_dir.path().join("nested/dir/rules.json"));

        let rules = OrderingRules::new(
            ["intro", "chapter"].into_iter().collect(),
            SortDirection::Descending,
        );
        store.save(&rules).await.unwrap();

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("\"keyword_order\""));
        assert!(written.contains("  \"numeric_sort\": \"desc\""));

        assert_eq!(store.load().await.unwrap(), rules);
    }

    #[tokio::test]
    async fn test_load_reads_hand_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("priority_config.json");
        std::fs::write(
            &path,
            r#"{"keyword_order": ["cover", "toc"], "numeric_sort": "asc"}"#,
        )
        .unwrap();

        let rules = RulesStore::new(&path).load().await.unwrap();
        let expected: PriorityList = ["cover", "toc"].into_iter().collect();
        assert_eq!(rules.keyword_order, expected);
        assert_eq!(rules.numeric_sort, SortDirection::Ascending);
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = RulesStore::new(&path).load().await;
        assert!(matches!(result, Err(PdfOrderError::FailedToLoadRules { .. })));
    }

    #[tokio::test]
    async fn test_update_persists_only_on_success() {
        let temp_dir = TempDir::new().unwrap();
        let store = RulesStore::new(temp_dir.path().join("rules.json"));

        let added = store
            .update(|rules| Ok(rules.keyword_order.add("intro")))
            .await
            .unwrap();
        assert!(added);

        let failed = store
            .update(|rules| {
                rules.keyword_order.add("never-saved");
                Err::<(), _>(PdfOrderError::invalid_config("nope"))
            })
            .await;
        assert!(failed.is_err());

        let rules = store.load().await.unwrap();
        assert_eq!(rules.keyword_order.len(), 1);
        assert_eq!(rules.keyword_order.get(0), Some("intro"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(RulesStore::default().path(), Path::new(DEFAULT_RULES_FILE));
    }
}
