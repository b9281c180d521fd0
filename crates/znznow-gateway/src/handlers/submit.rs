//! Stateless submit-and-download endpoint.
//!
//! Accepts the same payload as `POST /agreements`, renders the PDF, and
//! streams it straight back as an attachment. Nothing touches the record
//! store or the file tree.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use znznow_service::Agreements;

use crate::error::ApiError;
use crate::handlers::agreements::{download_filename, pdf_response, CreateAgreementBody};
use crate::state::GatewayState;

/// Render a submission and return the PDF directly, persisting nothing.
///
/// # Errors
///
/// Returns `bad_request` naming the first missing mandatory field, or an
/// internal error if rendering fails.
pub async fn submit_direct<A>(
    State(state): State<Arc<GatewayState<A>>>,
    Json(body): Json<CreateAgreementBody>,
) -> Result<Response, ApiError>
where
    A: Agreements + 'static,
{
    let submission = body.into_submission()?;
    let vendor_name = submission.form.vendor_name.clone();
    let bytes = state.service.render_preview(&submission).await?;

    let filename = download_filename(&vendor_name);
    Ok(pdf_response(
        bytes,
        format!("attachment; filename=\"{filename}\""),
    ))
}
