//! Message formatting and display.
//!
//! Regular output goes to stdout. Warnings and errors go to stderr so that
//! `pdforder order` can be piped without picking up diagnostics.
//!
//! # Examples
//!
//! ```
//! use pdforder::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Ordering files...");
//! formatter.success("Merged 3 files into merged_output.pdf");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color_code(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Success => Some("\x1b[32m"), // Green
            Self::Warning => Some("\x1b[33m"), // Yellow
            Self::Error => Some("\x1b[31m"),   // Red
            Self::Debug => Some("\x1b[36m"),   // Cyan
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// Color is enabled when stdout is a terminal and `TERM` is set.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Create a formatter from the run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Force color on or off.
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a message only in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.emit(MessageLevel::Debug, message);
        }
    }

    /// Render a message the way it would be printed.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        match level.color_code() {
            Some(color) if self.colored => format!("{color}{prefix}{message}\x1b[0m"),
            _ => format!("{prefix}{message}"),
        }
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        let line = self.render(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled detail line. Verbose mode only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered list item (1-based). Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Check if output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
