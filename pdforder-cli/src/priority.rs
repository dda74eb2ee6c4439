//! `pdforder priority` subcommands.

use pdforder::error::{PdfOrderError, Result};
use pdforder::ordering::OrderingRules;
use pdforder::output::{OutputFormatter, display_rules};
use pdforder::store::RulesStore;

use crate::cli::PriorityAction;

/// Run one priority editing action against `store`.
pub async fn run(
    action: PriorityAction,
    store: &RulesStore,
    formatter: &OutputFormatter,
) -> Result<()> {
    let message = match action {
        PriorityAction::List => {
            let rules = store.load().await?;
            display_rules(formatter, &rules);
            return Ok(());
        }
        PriorityAction::Add { keyword } => {
            store
                .update(|rules| {
                    if rules.keyword_order.add(keyword.as_str()) {
                        Ok(())
                    } else {
                        Err(PdfOrderError::invalid_config("Keyword must not be empty"))
                    }
                })
                .await?;
            format!("Added keyword '{keyword}'")
        }
        PriorityAction::Remove { position } => {
            let removed = store
                .update(|rules| {
                    let index = to_index(rules, position)?;
                    Ok(rules.keyword_order.remove(index))
                })
                .await?;
            format!("Removed keyword '{}'", removed.unwrap_or_default())
        }
        PriorityAction::Up { position } => {
            let moved = store
                .update(|rules| {
                    let index = to_index(rules, position)?;
                    Ok(rules.keyword_order.move_up(index))
                })
                .await?;
            describe_move(position, moved)
        }
        PriorityAction::Down { position } => {
            let moved = store
                .update(|rules| {
                    let index = to_index(rules, position)?;
                    Ok(rules.keyword_order.move_down(index))
                })
                .await?;
            describe_move(position, moved)
        }
        PriorityAction::SetDirection { direction } => {
            store
                .update(|rules| {
                    rules.numeric_sort = direction;
                    Ok(())
                })
                .await?;
            format!("Numeric sort set to {direction}")
        }
    };

    formatter.success(&message);
    if formatter.is_verbose() {
        display_rules(formatter, &store.load().await?);
    }
    Ok(())
}

/// Convert a 1-based position into an index into the keyword list.
fn to_index(rules: &OrderingRules, position: usize) -> Result<usize> {
    let len = rules.keyword_order.len();
    if position == 0 || position > len {
        return Err(PdfOrderError::KeywordIndexOutOfRange {
            index: position,
            len,
        });
    }
    Ok(position - 1)
}

fn describe_move(position: usize, moved: Option<usize>) -> String {
    match moved {
        Some(index) => format!("Moved keyword from position {position} to {}", index + 1),
        None => format!("Keyword at position {position} is already in place"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdforder::ordering::SortDirection;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RulesStore {
        RulesStore::new(dir.path().join("priority_config.json"))
    }

    async fn keywords(store: &RulesStore) -> Vec<String> {
        let rules = store.load().await.unwrap();
        rules.keyword_order.iter().map(str::to_string).collect()
    }

    #[tokio::test]
    async fn test_add_and_reorder() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let formatter = OutputFormatter::quiet();

        for keyword in ["intro", "chapter", "appendix"] {
            run(
                PriorityAction::Add {
                    keyword: keyword.to_string(),
                },
                &store,
                &formatter,
            )
            .await
            .unwrap();
        }
        assert_eq!(keywords(&store).await, ["intro", "chapter", "appendix"]);

        run(PriorityAction::Up { position: 3 }, &store, &formatter)
            .await
            .unwrap();
        assert_eq!(keywords(&store).await, ["intro", "appendix", "chapter"]);

        run(PriorityAction::Down { position: 1 }, &store, &formatter)
            .await
            .unwrap();
        assert_eq!(keywords(&store).await, ["appendix", "intro", "chapter"]);

        run(PriorityAction::Remove { position: 2 }, &store, &formatter)
            .await
            .unwrap();
        assert_eq!(keywords(&store).await, ["appendix", "chapter"]);
    }

    #[tokio::test]
    async fn test_move_at_boundary_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let formatter = OutputFormatter::quiet();
        store
            .save(&OrderingRules::new(
                ["a", "b"].into_iter().collect(),
                SortDirection::Ascending,
            ))
            .await
            .unwrap();

        run(PriorityAction::Up { position: 1 }, &store, &formatter)
            .await
            .unwrap();
        run(PriorityAction::Down { position: 2 }, &store, &formatter)
            .await
            .unwrap();
        assert_eq!(keywords(&store).await, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_out_of_range_position() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let formatter = OutputFormatter::quiet();

        let result = run(PriorityAction::Remove { position: 1 }, &store, &formatter).await;
        assert!(matches!(
            result,
            Err(PdfOrderError::KeywordIndexOutOfRange { index: 1, len: 0 })
        ));

        let result = run(PriorityAction::Up { position: 0 }, &store, &formatter).await;
        assert!(result.is_err());
        // Failed edits leave no file behind.
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_empty_keyword_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let result = run(
            PriorityAction::Add {
                keyword: String::new(),
            },
            &store,
            &OutputFormatter::quiet(),
        )
        .await;
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_set_direction_keeps_keywords() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let formatter = OutputFormatter::quiet();

        run(
            PriorityAction::Add {
                keyword: "intro".to_string(),
            },
            &store,
            &formatter,
        )
        .await
        .unwrap();
        run(
            PriorityAction::SetDirection {
                direction: SortDirection::Descending,
            },
            &store,
            &formatter,
        )
        .await
        .unwrap();

        let rules = store.load().await.unwrap();
        assert_eq!(rules.numeric_sort, SortDirection::Descending);
        assert_eq!(keywords(&store).await, ["intro"]);
    }
}
