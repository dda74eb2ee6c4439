//! Run configuration for pdforder.
//!
//! The CLI turns its arguments into a [`Config`], which drives ordering and
//! merging. Priority rules are carried as an explicit [`OrderingRules`] value
//! rather than read from disk by the components that use them.

use anyhow::{Result, bail};

use crate::PdfOrderError;
use crate::ordering::{OrderingRules, order_paths};
use std::{path::PathBuf, str::FromStr};

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT: &str = "merged_output.pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Compress and prune unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfOrderError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfOrderError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for an ordered merge.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discovered input files, in no particular order.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Keyword priorities and numeric direction.
    pub rules: OrderingRules,

    /// Dry run mode - show the plan without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Skip unreadable PDFs instead of stopping.
    pub continue_on_error: bool,

    /// Number of parallel load jobs (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Configuration with defaults for everything but inputs and output.
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            rules: OrderingRules::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            continue_on_error: false,
            jobs: None,
        }
    }

    /// Inputs in merge order.
    pub fn ordered_inputs(&self) -> Vec<PathBuf> {
        order_paths(&self.rules, self.inputs.iter().cloned())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.inputs.contains(&self.output) {
            bail!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            );
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
