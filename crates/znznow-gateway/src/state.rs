//! Gateway application state.
//!
//! This module defines the shared state that is available to all request
//! handlers.

use std::sync::Arc;

use znznow_service::Agreements;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct GatewayState<A>
where
    A: Agreements,
{
    /// The agreement service behind all handlers.
    pub service: Arc<A>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<A> GatewayState<A>
where
    A: Agreements,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(service: Arc<A>, config: GatewayConfig) -> Self {
        Self { service, config }
    }
}

impl<A> Clone for GatewayState<A>
where
    A: Agreements,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        }
    }
}
