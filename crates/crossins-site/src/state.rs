//! Shared application state for the site.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the configuration, the CRM client and
//! the root shutdown token every mount derives from.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crossins_client::fetcher::Mount;
use crossins_client::{ClientError, CrmClient};

use crate::config::SiteConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Loaded site configuration.
    pub config: SiteConfig,
    /// CRM REST client (one connection pool for every mount).
    pub client: Arc<CrmClient>,
    /// Cancelled when the server begins shutting down.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a backend URL is unusable.
    pub fn new(config: SiteConfig, shutdown: CancellationToken) -> Result<Self, ClientError> {
        let client = CrmClient::with_config(config.client_config())?;
        Ok(Self {
            config,
            client: Arc::new(client),
            shutdown,
        })
    }

    /// Mount scope for one page render.
    pub fn mount(&self) -> Mount {
        Mount::child_of(&self.shutdown)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bind_addr", &self.config.bind_addr)
            .field("api_base_url", &self.client.api_base_url())
            .finish_non_exhaustive()
    }
}
