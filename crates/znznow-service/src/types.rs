//! Request and result types for the agreement service.

use serde::Serialize;

use znznow_core::{AgreementForm, AgreementId};

/// A full submission: the validated form fields plus the raw signature
/// string as it arrived on the wire.
#[derive(Debug, Clone)]
pub struct AgreementSubmission {
    /// Validated form fields.
    pub form: AgreementForm,
    /// Signature data URI as submitted.
    pub signature: String,
}

/// The outcome of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedAgreement {
    /// Identifier of the new record.
    pub id: AgreementId,
    /// URL serving the PDF inline.
    pub pdf_url: String,
    /// URL serving the PDF as an attachment.
    pub download_url: String,
}

/// A stored PDF resolved for serving.
#[derive(Debug, Clone)]
pub struct StoredPdf {
    /// The document bytes.
    pub bytes: Vec<u8>,
    /// Vendor name, used to derive the download filename.
    pub vendor_name: String,
}
