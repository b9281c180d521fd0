//! HTTP gateway for the ZNZNOW vendor agreement platform.
//!
//! This crate provides the public-facing API for submitting vendor
//! agreements and retrieving the generated PDF documents. It handles:
//!
//! - Required-field validation of submission payloads
//! - REST endpoints for creation, retrieval, listing, and statistics
//! - Inline and attachment PDF serving
//! - A stateless submit-and-download mode that persists nothing
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                       Clients                          │
//! │                    (HTTP + JSON)                       │
//! └────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌────────────────────────────────────────────────────────┐
//! │                    znznow-gateway                      │
//! │     ┌─────────────┐           ┌──────────────────┐     │
//! │     │  Validation │           │ Router + Handlers│     │
//! │     └─────────────┘           └──────────────────┘     │
//! └────────────────────────────────────────────────────────┘
//!                            │
//!              ┌─────────────┼─────────────┐
//!              ▼             ▼             ▼
//!       ┌──────────┐  ┌───────────┐  ┌──────────┐
//!       │ Renderer │  │   Store   │  │  Files   │
//!       └──────────┘  └───────────┘  └──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use znznow_document::PdfRenderer;
//! use znznow_gateway::{create_router, GatewayConfig, GatewayState};
//! use znznow_service::{AgreementService, EmailNotifier, FileStore, NotifierConfig};
//! use znznow_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = FileStore::open("/data/vendor-agreements")?;
//! let store = Arc::new(SqliteStore::open("/data/vendor-agreements/agreements.db")?);
//! let notifier = EmailNotifier::new(NotifierConfig::default());
//! let service = Arc::new(AgreementService::new(
//!     store,
//!     files,
//!     PdfRenderer::default(),
//!     notifier,
//! ));
//!
//! let state = GatewayState::new(service, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
