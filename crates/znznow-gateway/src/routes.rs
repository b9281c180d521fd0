//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use znznow_service::Agreements;

use crate::handlers::{agreements, health, statistics, submit};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET  /health` - Health check
/// - `POST /agreements` - Submit an agreement
/// - `GET  /agreements` - List agreements (paginated, optional status filter)
/// - `GET  /agreements/{agreement_id}` - Get one agreement
/// - `GET  /agreements/{agreement_id}/pdf` - View the PDF inline
/// - `GET  /agreements/{agreement_id}/download` - Download the PDF
/// - `GET  /agreements/{agreement_id}/whatsapp` - WhatsApp share link
/// - `GET  /statistics` - Aggregate statistics
/// - `POST /submit` - Stateless render-and-download, nothing persisted
pub fn create_router<A>(state: GatewayState<A>) -> Router
where
    A: Agreements + 'static,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/agreements",
            post(agreements::create_agreement::<A>).get(agreements::list_agreements::<A>),
        )
        .route(
            "/agreements/{agreement_id}",
            get(agreements::get_agreement::<A>),
        )
        .route(
            "/agreements/{agreement_id}/pdf",
            get(agreements::view_pdf::<A>),
        )
        .route(
            "/agreements/{agreement_id}/download",
            get(agreements::download_pdf::<A>),
        )
        .route(
            "/agreements/{agreement_id}/whatsapp",
            get(agreements::whatsapp_share_link::<A>),
        )
        .route("/statistics", get(statistics::statistics::<A>))
        .route("/submit", post(submit::submit_direct::<A>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
