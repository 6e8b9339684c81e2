//! Error types for pdfslice library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfslice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inspecting or exporting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// The source PDF does not exist.
    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// An external tool could not be run or exited unsuccessfully.
    #[error("{tool} error: {output}")]
    ToolFailed {
        /// Program that was invoked
        tool: String,
        /// Captured stdout and stderr of the invocation
        output: String,
    },

    /// Page index is out of range.
    #[error("The page {index} does not exist (document has {count} pages)")]
    PageOutOfRange {
        /// Zero-based index that was requested
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// The operation would modify the document.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
