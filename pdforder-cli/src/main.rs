//! pdforder - Merge PDF files in keyword-priority order.
//!
//! Collects PDFs from files, folders and glob patterns, orders them by the
//! stored priority rules and concatenates them into a single document.

mod cli;
mod priority;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Cli, Command, MergeArgs, SelectionArgs};
use pdforder::config::{Config, OverwriteMode};
use pdforder::discovery::read_input_list;
use pdforder::error::{PdfOrderError, Result};
use pdforder::io::PdfWriter;
use pdforder::merge::Merger;
use pdforder::ordering::{FileEntry, compute_order};
use pdforder::output::{OutputFormatter, display_merge_statistics, display_order};
use pdforder::store::RulesStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// RUST_LOG always takes precedence; `--verbose` falls back to DEBUG.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
    let store = cli.rules_store();

    match cli.command {
        Command::Merge(args) => merge(&args, &store, cli.verbose, cli.quiet).await,
        Command::Order(args) => order(&args, &store, &formatter).await,
        Command::Priority { action } => priority::run(action, &store, &formatter).await,
    }
}

/// Print the computed merge order.
async fn order(args: &SelectionArgs, store: &RulesStore, formatter: &OutputFormatter) -> Result<()> {
    let rules = args.apply_direction(store.load().await?);
    let inputs = collect_inputs(args).await?;

    let entries: Vec<FileEntry> = inputs.into_iter().map(FileEntry::new).collect();
    let ordered = compute_order(&rules.keyword_order, rules.numeric_sort, &entries);

    display_order(formatter, &ordered, &rules);
    Ok(())
}

/// Order, merge and write.
async fn merge(args: &MergeArgs, store: &RulesStore, verbose: bool, quiet: bool) -> Result<()> {
    let rules = store.load().await?;
    let inputs = without_output(collect_inputs(&args.selection).await?, &args.output);
    if inputs.is_empty() {
        return Err(PdfOrderError::NoFilesToMerge);
    }

    let config = args.to_config(inputs, rules, verbose, quiet)?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdforder::NAME, pdforder::VERSION));
        formatter.blank_line();
    }

    if config.dry_run {
        let entries: Vec<FileEntry> = config
            .ordered_inputs()
            .into_iter()
            .map(FileEntry::new)
            .collect();
        display_order(&formatter, &entries, &config.rules);
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter).await?;

    formatter.info(&format!("Merging {} file(s)...", config.inputs.len()));
    let result = Merger::new().merge(&config).await?;

    for (index, path) in result.merged_files.iter().enumerate() {
        formatter.debug(&format!("{}. {}", index + 1, path.display()));
    }

    let write_stats = PdfWriter::new()
        .save_with_stats(&result.document, &config.output)
        .await?;

    formatter.success(&format!(
        "Merged {} files into {}",
        result.statistics.files_merged,
        config.output.display()
    ));
    if result.statistics.files_skipped > 0 {
        formatter.warning(&format!(
            "Skipped {} file(s) that could not be loaded",
            result.statistics.files_skipped
        ));
    }
    display_merge_statistics(&formatter, &result.statistics, &write_stats);

    Ok(())
}

/// Positional inputs followed by the `--input-list` entries, expanded into
/// PDF paths.
async fn collect_inputs(args: &SelectionArgs) -> Result<Vec<PathBuf>> {
    let mut raw = args.inputs.clone();
    if let Some(list) = &args.input_list {
        raw.extend(read_input_list(list).await?);
    }

    if raw.is_empty() {
        return Err(PdfOrderError::NoFilesToMerge);
    }

    args.discovery()?.collect(raw)
}

/// Drop the output file from the inputs, e.g. when merging a folder into
/// itself a second time.
fn without_output(inputs: Vec<PathBuf>, output: &Path) -> Vec<PathBuf> {
    let Ok(output) = output.canonicalize() else {
        return inputs;
    };
    inputs
        .into_iter()
        .filter(|input| {
            let same = input.canonicalize().is_ok_and(|input| input == output);
            if same {
                tracing::debug!(path = %input.display(), "Ignoring output file among inputs");
            }
            !same
        })
        .collect()
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    if !PdfWriter::new().exists(&config.output).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfOrderError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet mode.
            if formatter.is_quiet() {
                return Err(PdfOrderError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfOrderError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfOrderError::Cancelled)
            }
        }
    }
}
