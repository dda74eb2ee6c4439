//! Error types for pdforder.
//!
//! Ordering itself never fails. Everything in this module belongs to the
//! collaborators around it: reading the rules file, discovering inputs,
//! loading and concatenating PDFs, and writing the merged output.
//!
//! # Error Categories
//!
//! - **I/O Errors**: File not found, permission denied, etc.
//! - **PDF Errors**: Invalid PDF structure, corrupted files
//! - **Configuration Errors**: Invalid arguments or rules file contents
//! - **Merge Errors**: Problems while concatenating documents

use std::io;
use std::path::PathBuf;

/// Result type alias for pdforder operations.
pub type Result<T> = std::result::Result<T, PdfOrderError>;

/// Main error type for pdforder operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOrderError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Nothing was selected, or every selected file was skipped.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read an input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rules file exists but could not be read or parsed.
    #[error("Failed to load priority rules from: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadRules {
        /// Path to the rules file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The rules file could not be written.
    #[error("Failed to save priority rules to: {}\n  Reason: {source}", .path.display())]
    FailedToSaveRules {
        /// Path to the rules file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A glob or exclude pattern could not be parsed or expanded.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A keyword index passed to an editing command is out of range.
    #[error("No keyword at position {index} (list has {len} keyword(s))")]
    KeywordIndexOutOfRange {
        /// Requested 1-based position.
        index: usize,
        /// Current length of the list.
        len: usize,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfOrderError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<serde_json::Error> for PdfOrderError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<glob::GlobError> for PdfOrderError {
    fn from(err: glob::GlobError) -> Self {
        Self::FileNotAccessible {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        }
    }
}

impl From<anyhow::Error> for PdfOrderError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PdfOrderError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::other(format!("Background task failed: {err}"))
    }
}

impl PdfOrderError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a FailedToLoadRules error.
    pub fn failed_to_load_rules(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadRules {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (operation can continue).
    ///
    /// Returns true for per-file errors that `--continue-on-error` may skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. } | Self::CorruptedPdf { .. } | Self::EncryptedPdf { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::FailedToSaveRules { .. } => 5,
            Self::Io(_) => 5,
            Self::MergeFailed { .. } => 6,
            Self::NoFilesToMerge => 1,
            Self::FailedToLoadRules { .. } => 1,
            Self::InvalidPattern { .. } => 1,
            Self::KeywordIndexOutOfRange { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}
