//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::fulfillment::FulfillmentClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the
/// fulfillment client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    fulfillment: FulfillmentClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        let fulfillment = FulfillmentClient::new(&config.fulfillment);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                fulfillment,
            }),
        }
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the fulfillment API client.
    #[must_use]
    pub fn fulfillment(&self) -> &FulfillmentClient {
        &self.inner.fulfillment
    }
}
