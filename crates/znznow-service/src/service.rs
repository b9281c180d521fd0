//! The agreement service.
//!
//! This module provides the `Agreements` trait and the `AgreementService`
//! implementation that coordinates signature decoding, PDF rendering, file
//! writes, record persistence, audit logging, and notification.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use znznow_core::{AgreementId, AgreementStatus};
use znznow_document::{decode_signature, PdfRenderer};
use znznow_store::{Agreement, AgreementPage, AgreementStats, ListParams, Store};

use crate::error::{Result, ServiceError};
use crate::files::FileStore;
use crate::notify::EmailNotifier;
use crate::types::{AgreementSubmission, CreatedAgreement, StoredPdf};

/// Trait defining the agreement operations behind the HTTP layer.
///
/// Implementations handle persistence, rendering, and coordination; the
/// gateway only validates and translates.
#[async_trait]
pub trait Agreements: Send + Sync {
    /// Process a submission end to end and persist the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, the file writes, or the row insert
    /// fail. A signature that fails to decode is not an error.
    async fn submit(&self, submission: AgreementSubmission) -> Result<CreatedAgreement>;

    /// Render a submission without persisting anything.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    async fn render_preview(&self, submission: &AgreementSubmission) -> Result<Vec<u8>>;

    /// Fetch one agreement.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no record exists.
    async fn get(&self, id: &AgreementId) -> Result<Agreement>;

    /// Resolve and read the stored PDF for an agreement.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` when the record is absent,
    /// `ServiceError::PdfNotRecorded` when the record carries no path, and
    /// `ServiceError::PdfFileMissing` when the path no longer exists.
    async fn pdf(&self, id: &AgreementId) -> Result<StoredPdf>;

    /// Page through agreements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    async fn list(&self, params: ListParams) -> Result<AgreementPage>;

    /// Aggregate statistics over all agreements.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    async fn statistics(&self) -> Result<AgreementStats>;
}

/// The production implementation over a [`Store`].
pub struct AgreementService<S: Store> {
    store: Arc<S>,
    files: FileStore,
    renderer: PdfRenderer,
    notifier: EmailNotifier,
}

impl<S: Store> AgreementService<S> {
    /// Create a new service.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        files: FileStore,
        renderer: PdfRenderer,
        notifier: EmailNotifier,
    ) -> Self {
        Self {
            store,
            files,
            renderer,
            notifier,
        }
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: Store + 'static> Agreements for AgreementService<S> {
    async fn submit(&self, submission: AgreementSubmission) -> Result<CreatedAgreement> {
        let id = AgreementId::generate();

        // A failed decode or signature write only costs the stored copy;
        // the submission itself proceeds.
        let signature_bytes = decode_signature(&submission.signature);
        let signature_path = signature_bytes.as_deref().and_then(|bytes| {
            match self.files.save_signature(&id, bytes) {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(
                        agreement_id = %id,
                        error = %err,
                        "failed to save signature image"
                    );
                    None
                }
            }
        });

        let pdf_bytes = self
            .renderer
            .render(&submission.form, signature_bytes.as_deref())?;
        let pdf_path = self.files.save_pdf(&id, &pdf_bytes)?;

        // Row insert comes after the file writes; a crash in between leaves
        // an orphan file with no record.
        let now = Utc::now();
        let form = submission.form;
        let agreement = Agreement {
            id,
            vendor_name: form.vendor_name,
            vendor_email: form.vendor_email,
            vendor_registration: form.vendor_registration,
            vendor_address: form.vendor_address,
            vendor_city: form.vendor_city,
            vendor_country: form.vendor_country,
            vendor_phone: form.vendor_phone,
            contact_person: form.contact_person,
            contact_title: form.contact_title,
            partnership_level: form.partnership_level,
            effective_date: form.effective_date,
            created_at: now,
            pdf_path: Some(pdf_path.to_string_lossy().into_owned()),
            signature_path: signature_path.map(|p| p.to_string_lossy().into_owned()),
            status: AgreementStatus::Signed,
            znznow_signed_date: None,
            vendor_signed_date: Some(now.to_rfc3339()),
            notes: None,
        };
        self.store.create(&agreement)?;

        let details = serde_json::json!({
            "vendor": agreement.vendor_name,
            "email": agreement.vendor_email,
        });
        if let Err(err) = self.store.append_log(&id, "created", Some(details)) {
            tracing::warn!(agreement_id = %id, error = %err, "failed to append audit log entry");
        }

        let created = CreatedAgreement {
            id,
            pdf_url: format!("/agreements/{id}/pdf"),
            download_url: format!("/agreements/{id}/download"),
        };

        self.notifier
            .agreement_created(&agreement, &created.download_url)
            .await;

        tracing::info!(
            agreement_id = %id,
            vendor = %agreement.vendor_name,
            "agreement created"
        );
        Ok(created)
    }

    async fn render_preview(&self, submission: &AgreementSubmission) -> Result<Vec<u8>> {
        let signature_bytes = decode_signature(&submission.signature);
        Ok(self
            .renderer
            .render(&submission.form, signature_bytes.as_deref())?)
    }

    async fn get(&self, id: &AgreementId) -> Result<Agreement> {
        self.store.get(id)?.ok_or(ServiceError::NotFound(*id))
    }

    async fn pdf(&self, id: &AgreementId) -> Result<StoredPdf> {
        let agreement = self.store.get(id)?.ok_or(ServiceError::NotFound(*id))?;
        let path = agreement
            .pdf_path
            .map(PathBuf::from)
            .ok_or(ServiceError::PdfNotRecorded(*id))?;
        if !path.exists() {
            return Err(ServiceError::PdfFileMissing(path));
        }
        let bytes = std::fs::read(&path)?;
        Ok(StoredPdf {
            bytes,
            vendor_name: agreement.vendor_name,
        })
    }

    async fn list(&self, params: ListParams) -> Result<AgreementPage> {
        Ok(self.store.list(&params)?)
    }

    async fn statistics(&self) -> Result<AgreementStats> {
        Ok(self.store.aggregate()?)
    }
}
