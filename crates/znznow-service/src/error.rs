//! Error types for the agreement service.

use std::path::PathBuf;

use thiserror::Error;
use znznow_core::AgreementId;

/// A result type using `ServiceError`.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while processing agreement operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No record exists for the requested id.
    #[error("agreement not found: {0}")]
    NotFound(AgreementId),

    /// The record exists but no PDF path was recorded for it.
    #[error("PDF not found")]
    PdfNotRecorded(AgreementId),

    /// The recorded PDF path no longer exists on disk.
    #[error("PDF file not found")]
    PdfFileMissing(PathBuf),

    /// Document rendering failed.
    #[error("render error: {0}")]
    Render(#[from] znznow_document::RenderError),

    /// Storage failure.
    #[error("storage error: {0}")]
    Store(#[from] znznow_store::StoreError),

    /// Filesystem failure in the artifact store.
    #[error("file store error: {0}")]
    Io(#[from] std::io::Error),
}
