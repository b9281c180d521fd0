//! Error types for document rendering.

use thiserror::Error;

/// A result type using `RenderError`.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while building the agreement PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The PDF library rejected the document.
    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),
    /// An I/O error occurred while serializing the document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
