//! Agreement endpoints.
//!
//! This module provides handlers for submission, retrieval, PDF serving,
//! listing, and the WhatsApp share link.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use znznow_core::{AgreementForm, AgreementId};
use znznow_service::{whatsapp_link, Agreements, AgreementSubmission};
use znznow_store::{Agreement, ListParams};

use crate::error::ApiError;
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request body for agreement submission.
///
/// Every field is optional at the serde level so that presence validation
/// can name the first missing mandatory field instead of failing
/// deserialization wholesale.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgreementBody {
    /// Registered business name. Mandatory.
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Contact email address. Mandatory.
    #[serde(default)]
    pub vendor_email: Option<String>,
    /// Business registration number. Mandatory.
    #[serde(default)]
    pub vendor_registration: Option<String>,
    /// Street address.
    #[serde(default)]
    pub vendor_address: Option<String>,
    /// City or region.
    #[serde(default)]
    pub vendor_city: Option<String>,
    /// Country.
    #[serde(default)]
    pub vendor_country: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub vendor_phone: Option<String>,
    /// Primary contact person. Mandatory.
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Title of the contact person.
    #[serde(default)]
    pub contact_title: Option<String>,
    /// Partnership level code.
    #[serde(default)]
    pub partnership_level: Option<String>,
    /// Effective date.
    #[serde(default)]
    pub effective_date: Option<String>,
    /// Signature data URI. Mandatory.
    #[serde(default)]
    pub signature: Option<String>,
}

impl CreateAgreementBody {
    /// Validate presence of the mandatory fields and build the submission.
    ///
    /// # Errors
    ///
    /// Returns a `bad_request` error naming the first missing field, in the
    /// order vendorName, vendorEmail, vendorRegistration, contactPerson,
    /// signature.
    pub fn into_submission(self) -> Result<AgreementSubmission, ApiError> {
        Ok(AgreementSubmission {
            form: AgreementForm {
                vendor_name: require(self.vendor_name, "vendorName")?,
                vendor_email: require(self.vendor_email, "vendorEmail")?,
                vendor_registration: require(self.vendor_registration, "vendorRegistration")?,
                vendor_address: self.vendor_address.unwrap_or_default(),
                vendor_city: self.vendor_city.unwrap_or_default(),
                vendor_country: self.vendor_country.unwrap_or_default(),
                vendor_phone: self.vendor_phone.unwrap_or_default(),
                contact_person: require(self.contact_person, "contactPerson")?,
                contact_title: self.contact_title.unwrap_or_default(),
                partnership_level: self.partnership_level.unwrap_or_default(),
                effective_date: self.effective_date.unwrap_or_default(),
            },
            signature: require(self.signature, "signature")?,
        })
    }
}

fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("missing required field: {field}")))
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct CreateAgreementResponse {
    /// Identifier of the new record.
    pub id: String,
    /// Fixed outcome marker, `success`.
    pub status: &'static str,
    /// Human-readable confirmation.
    pub message: &'static str,
    /// URL serving the PDF inline.
    pub pdf_url: String,
    /// URL serving the PDF as an attachment.
    pub download_url: String,
}

/// Response for a single agreement.
#[derive(Debug, Serialize)]
pub struct AgreementResponse {
    /// Agreement identifier.
    pub id: String,
    /// Registered business name.
    pub vendor_name: String,
    /// Contact email address.
    pub vendor_email: String,
    /// Business registration number.
    pub vendor_registration: String,
    /// Street address.
    pub vendor_address: String,
    /// City or region.
    pub vendor_city: String,
    /// Country.
    pub vendor_country: String,
    /// Contact phone number.
    pub vendor_phone: String,
    /// Primary contact person.
    pub contact_person: String,
    /// Title of the contact person.
    pub contact_title: String,
    /// Partnership level code as submitted.
    pub partnership_level: String,
    /// Effective date as submitted.
    pub effective_date: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Path of the generated PDF.
    pub pdf_path: Option<String>,
    /// Path of the saved signature image.
    pub signature_path: Option<String>,
    /// Record status.
    pub status: String,
    /// When ZNZNOW counter-signed.
    pub znznow_signed_date: Option<String>,
    /// When the vendor signed.
    pub vendor_signed_date: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl From<Agreement> for AgreementResponse {
    fn from(agreement: Agreement) -> Self {
        Self {
            id: agreement.id.to_string(),
            vendor_name: agreement.vendor_name,
            vendor_email: agreement.vendor_email,
            vendor_registration: agreement.vendor_registration,
            vendor_address: agreement.vendor_address,
            vendor_city: agreement.vendor_city,
            vendor_country: agreement.vendor_country,
            vendor_phone: agreement.vendor_phone,
            contact_person: agreement.contact_person,
            contact_title: agreement.contact_title,
            partnership_level: agreement.partnership_level,
            effective_date: agreement.effective_date,
            created_at: agreement.created_at.to_rfc3339(),
            pdf_path: agreement.pdf_path,
            signature_path: agreement.signature_path,
            status: agreement.status.to_string(),
            znznow_signed_date: agreement.znznow_signed_date,
            vendor_signed_date: agreement.vendor_signed_date,
            notes: agreement.notes,
        }
    }
}

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListAgreementsQuery {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Exact status filter.
    #[serde(default)]
    pub status: Option<String>,
}

const fn default_page() -> u32 {
    1
}

const fn default_per_page() -> u32 {
    20
}

/// Response for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListAgreementsResponse {
    /// The rows on this page, newest first.
    pub agreements: Vec<AgreementResponse>,
    /// Total rows matching the filter.
    pub total: u64,
    /// The requested page.
    pub page: u32,
    /// The requested page size.
    pub per_page: u32,
    /// Total page count for this filter.
    pub pages: u64,
}

/// Response for the WhatsApp share link.
#[derive(Debug, Serialize)]
pub struct WhatsAppLinkResponse {
    /// The `wa.me` share link.
    pub link: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a new vendor agreement.
///
/// # Errors
///
/// Returns `bad_request` naming the first missing mandatory field, or an
/// internal error if rendering or persistence fails.
pub async fn create_agreement<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Json(body): Json<CreateAgreementBody>,
) -> Result<impl IntoResponse, ApiError>
where
    A: Agreements + 'static,
{
    let submission = body.into_submission()?;
    let created = state.service.submit(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAgreementResponse {
            id: created.id.to_string(),
            status: "success",
            message: "Agreement created successfully",
            pdf_url: created.pdf_url,
            download_url: created.download_url,
        }),
    ))
}

/// Get a single agreement by ID.
///
/// # Errors
///
/// Returns `not_found` if no record exists, `bad_request` for a malformed id.
pub async fn get_agreement<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(agreement_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    A: Agreements + 'static,
{
    let id = parse_agreement_id(&agreement_id)?;
    let agreement = state.service.get(&id).await?;

    Ok(Json(AgreementResponse::from(agreement)))
}

/// Serve the agreement PDF inline.
///
/// # Errors
///
/// Returns `not_found` if the record, the recorded path, or the file itself
/// is missing.
pub async fn view_pdf<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(agreement_id): Path<String>,
) -> Result<Response, ApiError>
where
    A: Agreements + 'static,
{
    let id = parse_agreement_id(&agreement_id)?;
    let pdf = state.service.pdf(&id).await?;

    Ok(pdf_response(pdf.bytes, "inline".to_string()))
}

/// Serve the agreement PDF as an attachment with a derived filename.
///
/// # Errors
///
/// Returns `not_found` if the record, the recorded path, or the file itself
/// is missing.
pub async fn download_pdf<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(agreement_id): Path<String>,
) -> Result<Response, ApiError>
where
    A: Agreements + 'static,
{
    let id = parse_agreement_id(&agreement_id)?;
    let pdf = state.service.pdf(&id).await?;

    let filename = download_filename(&pdf.vendor_name);
    Ok(pdf_response(
        pdf.bytes,
        format!("attachment; filename=\"{filename}\""),
    ))
}

/// List agreements with pagination and an optional status filter.
///
/// # Errors
///
/// Returns an internal error if the store query fails.
pub async fn list_agreements<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Query(query): Query<ListAgreementsQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    A: Agreements + 'static,
{
    let page = state
        .service
        .list(ListParams {
            page: query.page,
            per_page: query.per_page,
            status: query.status,
        })
        .await?;

    Ok(Json(ListAgreementsResponse {
        agreements: page
            .agreements
            .into_iter()
            .map(AgreementResponse::from)
            .collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        pages: page.pages,
    }))
}

/// Build a WhatsApp share link for a signed agreement.
///
/// # Errors
///
/// Returns `not_found` if the record is absent and `bad_request` when no
/// phone number was submitted.
pub async fn whatsapp_share_link<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Path(agreement_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    A: Agreements + 'static,
{
    let id = parse_agreement_id(&agreement_id)?;
    let agreement = state.service.get(&id).await?;

    if agreement.vendor_phone.is_empty() {
        return Err(ApiError::BadRequest(
            "vendor has no phone number on file".to_string(),
        ));
    }

    let download_url = format!(
        "{}/agreements/{id}/download",
        state.config.public_base_url.trim_end_matches('/')
    );
    let link = whatsapp_link(&agreement.vendor_phone, &agreement.vendor_name, &download_url);

    Ok(Json(WhatsAppLinkResponse { link }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse an agreement ID from a path segment.
pub(crate) fn parse_agreement_id(s: &str) -> Result<AgreementId, ApiError> {
    AgreementId::parse(s).map_err(|_| ApiError::BadRequest(format!("invalid agreement id: {s}")))
}

/// The download filename: vendor name with spaces collapsed plus the year.
pub(crate) fn download_filename(vendor_name: &str) -> String {
    let year = Utc::now().year();
    format!(
        "ZNZNOW_Agreement_{}_{year}.pdf",
        vendor_name.replace(' ', "_")
    )
}

/// A binary PDF response with the given content disposition.
pub(crate) fn pdf_response(bytes: Vec<u8>, disposition: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> CreateAgreementBody {
        CreateAgreementBody {
            vendor_name: Some("Spice Tours".to_string()),
            vendor_email: Some("a@b.com".to_string()),
            vendor_registration: Some("REG1".to_string()),
            contact_person: Some("Jane".to_string()),
            signature: Some("data:image/png;base64,aGVsbG8=".to_string()),
            ..CreateAgreementBody::default()
        }
    }

    #[test]
    fn validation_passes_with_mandatory_fields() {
        let submission = full_body().into_submission().unwrap();
        assert_eq!(submission.form.vendor_name, "Spice Tours");
        assert_eq!(submission.form.vendor_address, "");
    }

    #[test]
    fn validation_names_each_missing_field() {
        let cases: [(&str, fn(&mut CreateAgreementBody)); 5] = [
            ("vendorName", |b| b.vendor_name = None),
            ("vendorEmail", |b| b.vendor_email = None),
            ("vendorRegistration", |b| b.vendor_registration = None),
            ("contactPerson", |b| b.contact_person = None),
            ("signature", |b| b.signature = None),
        ];

        for (field, strip) in cases {
            let mut body = full_body();
            strip(&mut body);
            let err = body.into_submission().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("bad request: missing required field: {field}")
            );
        }
    }

    #[test]
    fn download_filename_derives_from_vendor_and_year() {
        let filename = download_filename("Spice Tours");
        assert!(filename.starts_with("ZNZNOW_Agreement_Spice_Tours_"));
        assert!(filename.ends_with(".pdf"));
    }

    #[test]
    fn malformed_id_is_bad_request() {
        let err = parse_agreement_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
