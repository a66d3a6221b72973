//! Configuration for the Discovery API service.

use sewa_discovery::{CityFallback, DiscoveryConfig, RadiusOverride};
use std::time::Duration;

/// Discovery API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Database pool size
    pub db_max_connections: u32,
    /// Discovery core configuration
    pub discovery: DiscoveryConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8082".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // City fallback policies
        let listing_fallback: CityFallback = std::env::var("LISTING_CITY_FALLBACK")
            .unwrap_or_else(|_| "city_match".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("LISTING_CITY_FALLBACK"))?;

        let booking_fallback: CityFallback = std::env::var("BOOKING_CITY_FALLBACK")
            .unwrap_or_else(|_| "tier_gated".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("BOOKING_CITY_FALLBACK"))?;

        // Caller radius handling
        let vendor_radius_override: RadiusOverride = std::env::var("VENDOR_RADIUS_OVERRIDE")
            .unwrap_or_else(|_| "narrow".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("VENDOR_RADIUS_OVERRIDE"))?;

        let society_radius_override: RadiusOverride = std::env::var("SOCIETY_RADIUS_OVERRIDE")
            .unwrap_or_else(|_| "replace".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SOCIETY_RADIUS_OVERRIDE"))?;

        // Request timeout
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Metrics
        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let discovery = DiscoveryConfig::new()
            .with_listing_fallback(listing_fallback)
            .with_booking_fallback(booking_fallback)
            .with_vendor_radius_override(vendor_radius_override)
            .with_society_radius_override(society_radius_override);

        Ok(Self {
            http_port,
            database_url,
            db_max_connections,
            discovery,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
