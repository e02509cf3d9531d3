//! Error types for the newsprint library.

use std::io;
use thiserror::Error;

/// Result type alias for newsprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during segmentation and export.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A detection pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The input violates a precondition of the segmenter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few articles survived the body-length gate.
    ///
    /// The segmenter recovers from this by falling back to chunking; it only
    /// reaches callers that drive the assembler directly.
    #[error("Insufficient structure: {found} article(s) recovered, {required} required")]
    InsufficientStructure {
        /// Articles that survived gating
        found: usize,
        /// Minimum article count configured
        required: usize,
    },

    /// Error while exporting or publishing articles.
    #[error("Export error: {0}")]
    Export(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
