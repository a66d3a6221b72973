//! Application state for the Discovery API service.

use sewa_db::pg::{PgProviderRepository, PgSocietyRepository, PgSubscriptionRepository, Repositories};
use sewa_db::DbPool;
use sewa_discovery::DiscoveryService;
use std::sync::Arc;

use crate::config::Config;

/// Discovery service over the PostgreSQL repositories
pub type PgDiscoveryService =
    DiscoveryService<PgProviderRepository, PgSocietyRepository, PgSubscriptionRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Discovery service (listings, booking gate)
    pub discovery: Arc<PgDiscoveryService>,
    /// Database repositories (booking writes)
    pub repos: Repositories,
    /// Database pool (readiness probe)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repos: Repositories, pool: DbPool, config: Config) -> Self {
        let discovery = DiscoveryService::new(
            Arc::new(repos.providers.clone()),
            Arc::new(repos.societies.clone()),
            Arc::new(repos.subscriptions.clone()),
            config.discovery,
        );

        Self {
            discovery: Arc::new(discovery),
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
