//! CLI argument parsing for pdforder.
//!
//! This module defines the command-line interface using `clap`. It is also
//! compiled by the build script to render the man page, so it only depends on
//! `clap`, `std` and the `pdforder` library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdforder::config::{CompressionLevel, Config, DEFAULT_OUTPUT, OverwriteMode};
use pdforder::discovery::Discovery;
use pdforder::error::{PdfOrderError, Result};
use pdforder::ordering::{OrderingRules, SortDirection};
use pdforder::store::{DEFAULT_RULES_FILE, RulesStore};

/// Merge PDF files in keyword-priority order.
///
/// Files are ranked by the first priority keyword contained in their name,
/// then by the first number in the name, then alphabetically.
#[derive(Parser, Debug)]
#[command(name = "pdforder")]
#[command(version)]
#[command(about = "Merge PDF files in keyword-priority order", long_about = None)]
#[command(author)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Priority rules file
    ///
    /// JSON file holding the keyword order and the numeric sort direction.
    /// A missing file means no keywords and ascending numbers.
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "PDFORDER_CONFIG",
        default_value = DEFAULT_RULES_FILE
    )]
    pub config: PathBuf,

    /// Verbose output (also sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Order the selected PDFs and merge them into one file
    Merge(MergeArgs),

    /// Show the order the selected PDFs would be merged in
    Order(SelectionArgs),

    /// Show or edit the priority keywords
    Priority {
        #[command(subcommand)]
        action: PriorityAction,
    },
}

/// Which files take part, and how numbers are sorted for this run.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Input PDF files, folders or glob patterns
    ///
    /// A folder contributes the .pdf files directly inside it.
    /// The order given here does not matter.
    ///
    /// Examples:
    ///   pdforder merge ./scans
    ///   pdforder merge 'chapter*.pdf' cover.pdf
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Include .pdf files in subfolders of folder inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Skip files matching this glob (repeatable)
    ///
    /// Matched against both the full path and the file name.
    #[arg(short = 'x', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Read additional inputs from a file (one path per line)
    ///
    /// Lines starting with '#' and blank lines are ignored.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Numeric sort direction for this run (asc or desc)
    ///
    /// Overrides the direction stored in the rules file without saving it.
    #[arg(short, long, value_name = "DIRECTION")]
    pub direction: Option<SortDirection>,
}

impl SelectionArgs {
    /// Build the discovery settings for these arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is malformed.
    pub fn discovery(&self) -> Result<Discovery> {
        Discovery::new()
            .recursive(self.recursive)
            .exclude(&self.exclude)
    }

    /// Apply the direction override, if any.
    pub fn apply_direction(&self, rules: OrderingRules) -> OrderingRules {
        match self.direction {
            Some(direction) => rules.with_direction(direction),
            None => rules,
        }
    }
}

/// Arguments of `pdforder merge`.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Dry run - show the merge order without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for output PDF
    ///
    /// - none: No compression
    /// - standard: Compress content streams (default)
    /// - maximum: Compress and drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Skip PDFs that fail to load instead of stopping
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of parallel jobs for loading PDFs
    ///
    /// Default is number of CPU cores. Use 1 for sequential loading.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl MergeArgs {
    /// Convert the arguments into a validated [`Config`].
    ///
    /// `inputs` are the discovered files and `rules` the loaded priority
    /// rules; the direction override is applied here.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is invalid or the resulting
    /// configuration fails validation.
    pub fn to_config(
        &self,
        inputs: Vec<PathBuf>,
        rules: OrderingRules,
        verbose: bool,
        quiet: bool,
    ) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let mut config = Config::new(inputs, self.output.clone());
        config.rules = self.selection.apply_direction(rules);
        config.dry_run = self.dry_run;
        config.verbose = verbose;
        config.quiet = quiet;
        config.overwrite_mode = overwrite_mode;
        config.compression = compression;
        config.continue_on_error = self.continue_on_error;
        config.jobs = self.jobs;

        config.validate().map_err(|e| {
            PdfOrderError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

/// Priority list editing. Positions are 1-based, as listed by `list`.
#[derive(Subcommand, Debug, Clone)]
pub enum PriorityAction {
    /// List keywords in priority order
    List,

    /// Append a keyword (lowest priority)
    Add {
        /// Keyword to match inside file names (case-sensitive)
        keyword: String,
    },

    /// Remove the keyword at POSITION
    Remove {
        /// 1-based position
        position: usize,
    },

    /// Move the keyword at POSITION one place up
    Up {
        /// 1-based position
        position: usize,
    },

    /// Move the keyword at POSITION one place down
    Down {
        /// 1-based position
        position: usize,
    },

    /// Store the numeric sort direction (asc or desc)
    SetDirection {
        /// New direction
        direction: SortDirection,
    },
}

impl Cli {
    /// Store for the selected rules file.
    pub fn rules_store(&self) -> RulesStore {
        RulesStore::new(self.config.clone())
    }
}
