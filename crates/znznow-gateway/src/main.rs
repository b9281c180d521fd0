//! ZNZNOW Agreement Gateway - HTTP API entry point.
//!
//! Accepts vendor agreement submissions, renders them into signed PDF
//! documents, persists one record per submission, and serves the documents
//! back on request.
//!
//! # Configuration
//!
//! Everything is environment-driven:
//!
//! - `LISTEN_ADDR` - bind address, default `0.0.0.0:8080`
//! - `DATA_DIR` - root of the upload tree and database file, default
//!   `/data/vendor-agreements`
//! - `PUBLIC_BASE_URL` - prefix for share links, default empty (relative)
//! - `RESEND_API_KEY` - enables outbound agreement emails when set
//! - `EMAIL_FROM` - from address on outgoing mail

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use znznow_document::PdfRenderer;
use znznow_gateway::{create_router, GatewayConfig, GatewayState};
use znznow_service::{AgreementService, EmailNotifier, FileStore, NotifierConfig};
use znznow_store::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,znznow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ZNZNOW Agreement Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/vendor-agreements".into());
    let public_base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or_default();
    let resend_api_key = std::env::var("RESEND_API_KEY").ok();
    let email_from =
        std::env::var("EMAIL_FROM").unwrap_or_else(|_| "noreply@znznow.com".into());

    tracing::info!(
        listen_addr = %listen_addr,
        data_dir = %data_dir,
        public_base_url = %public_base_url,
        email_enabled = resend_api_key.is_some(),
        "Gateway configuration loaded"
    );

    // Initialize the upload tree and the record store
    let files = FileStore::open(&data_dir)?;
    let db_path = std::path::Path::new(&data_dir).join("agreements.db");
    tracing::info!(path = %db_path.display(), "Opening SQLite store");
    let store = Arc::new(SqliteStore::open(db_path)?);

    if resend_api_key.is_none() {
        tracing::warn!("No RESEND_API_KEY set - agreement emails will only be logged");
    }
    let notifier = EmailNotifier::new(NotifierConfig {
        api_key: resend_api_key,
        from: email_from,
    });

    let service = Arc::new(AgreementService::new(
        store,
        files,
        PdfRenderer::default(),
        notifier,
    ));

    // Build gateway state and configuration
    let config = GatewayConfig {
        public_base_url,
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(service, config);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
