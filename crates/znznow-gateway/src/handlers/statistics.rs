//! Aggregate statistics endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use znznow_service::Agreements;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Response for the statistics endpoint.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    /// Total agreements on file.
    pub total: u64,
    /// Row counts grouped by status.
    pub by_status: BTreeMap<String, u64>,
    /// Row counts grouped by submitted partnership level.
    pub by_partnership: BTreeMap<String, u64>,
    /// The five most recently created records.
    pub recent: Vec<RecentEntry>,
}

/// One recent-agreements entry.
#[derive(Debug, Serialize)]
pub struct RecentEntry {
    /// Agreement identifier.
    pub id: String,
    /// Registered business name.
    pub vendor_name: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

/// Aggregate statistics handler.
///
/// # Errors
///
/// Returns an internal error if the store query fails.
pub async fn statistics<A>(
    State(state): State<Arc<GatewayState<A>>>,
) -> Result<impl IntoResponse, ApiError>
where
    A: Agreements + 'static,
{
    let stats = state.service.statistics().await?;

    Ok(Json(StatisticsResponse {
        total: stats.total,
        by_status: stats.by_status,
        by_partnership: stats.by_partnership,
        recent: stats
            .recent
            .into_iter()
            .map(|entry| RecentEntry {
                id: entry.id.to_string(),
                vendor_name: entry.vendor_name,
                created_at: entry.created_at.to_rfc3339(),
            })
            .collect(),
    }))
}
