//! Discovery configuration

use serde::{Deserialize, Serialize};

use sewa_types::ServiceRadius;

use crate::eligibility::CityFallback;
use crate::pagination::MAX_PAGE_LIMIT;

/// Page size used when the caller does not pass one
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// How a caller-supplied `radius_km` combines with the tier radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusOverride {
    /// Caller radius can only shrink the tier radius
    #[default]
    Narrow,
    /// Caller radius is used as given
    Replace,
}

impl RadiusOverride {
    /// Radius to search with
    pub fn apply(self, tier_radius: ServiceRadius, override_km: Option<u32>) -> ServiceRadius {
        match (self, override_km) {
            (Self::Replace, Some(km)) => ServiceRadius::Limited(km),
            _ => tier_radius.narrowed_to(override_km),
        }
    }
}

impl std::str::FromStr for RadiusOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "narrow" => Ok(Self::Narrow),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("invalid radius override: {s}")),
        }
    }
}

/// Discovery service configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// City fallback on the listing paths
    pub listing_fallback: CityFallback,
    /// City fallback on the booking gate
    pub booking_fallback: CityFallback,
    /// Caller radius handling on the society-facing vendor listing
    pub vendor_radius_override: RadiusOverride,
    /// Caller radius handling on the vendor-facing society listing
    pub society_radius_override: RadiusOverride,
    /// Upper bound applied to every page request
    pub max_page_limit: usize,
}

impl DiscoveryConfig {
    /// Create a config with default fallbacks
    pub fn new() -> Self {
        Self {
            listing_fallback: CityFallback::CityMatch,
            booking_fallback: CityFallback::TierGated,
            vendor_radius_override: RadiusOverride::Narrow,
            society_radius_override: RadiusOverride::Replace,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }

    /// Set the listing fallback
    pub fn with_listing_fallback(mut self, fallback: CityFallback) -> Self {
        self.listing_fallback = fallback;
        self
    }

    /// Set the booking fallback
    pub fn with_booking_fallback(mut self, fallback: CityFallback) -> Self {
        self.booking_fallback = fallback;
        self
    }

    /// Set caller radius handling for the vendor listing
    pub fn with_vendor_radius_override(mut self, mode: RadiusOverride) -> Self {
        self.vendor_radius_override = mode;
        self
    }

    /// Set caller radius handling for the society listing
    pub fn with_society_radius_override(mut self, mode: RadiusOverride) -> Self {
        self.society_radius_override = mode;
        self
    }

    /// Clamp a requested page size into `1..=max_page_limit`
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.max_page_limit)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::new()
    }
}
