//! Subscription tier types and tier economics
//!
//! This module is the only place that maps a [`Tier`] to the service radius
//! it buys. Every listing and booking path goes through [`Tier::service_radius`].

use serde::{Deserialize, Serialize, Serializer};

/// Vendor subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Basic plan billed monthly - 10 km radius
    BasicMonthly,
    /// Basic plan billed yearly - 10 km radius
    BasicYearly,
    /// Premium plan billed monthly - 25 km radius
    PremiumMonthly,
    /// Premium plan billed yearly - 25 km radius
    PremiumYearly,
    /// Elite plan, yearly only - no radius limit
    EliteYearly,
}

impl Tier {
    /// All tiers, cheapest first
    pub const ALL: [Tier; 5] = [
        Self::BasicMonthly,
        Self::BasicYearly,
        Self::PremiumMonthly,
        Self::PremiumYearly,
        Self::EliteYearly,
    ];

    /// Maximum distance a provider on this tier may serve
    pub const fn service_radius(&self) -> ServiceRadius {
        match self {
            Self::BasicMonthly | Self::BasicYearly => ServiceRadius::Limited(10),
            Self::PremiumMonthly | Self::PremiumYearly => ServiceRadius::Limited(25),
            Self::EliteYearly => ServiceRadius::Unlimited,
        }
    }

    /// Whether the tier may serve a different city when no distance can be computed
    pub const fn serves_other_cities(&self) -> bool {
        !matches!(self, Self::BasicMonthly | Self::BasicYearly)
    }

    /// Wire name, e.g. `premium_yearly`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BasicMonthly => "basic_monthly",
            Self::BasicYearly => "basic_yearly",
            Self::PremiumMonthly => "premium_monthly",
            Self::PremiumYearly => "premium_yearly",
            Self::EliteYearly => "elite_yearly",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    /// Storage may hold either the enum name (`ELITE_YEARLY`) or the value (`elite_yearly`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic_monthly" => Ok(Self::BasicMonthly),
            "basic_yearly" => Ok(Self::BasicYearly),
            "premium_monthly" => Ok(Self::PremiumMonthly),
            "premium_yearly" => Ok(Self::PremiumYearly),
            "elite_yearly" => Ok(Self::EliteYearly),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tier: {0}")]
pub struct TierParseError(pub String);

/// How far from its own location a provider may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRadius {
    /// Bounded radius in whole kilometres
    Limited(u32),
    /// No distance limit
    Unlimited,
}

impl ServiceRadius {
    /// Radius for providers without a current paid subscription
    pub const DEFAULT: ServiceRadius = ServiceRadius::Limited(10);

    /// Value reported to clients for [`ServiceRadius::Unlimited`]
    pub const UNLIMITED_WIRE_KM: u32 = 999_999;

    /// Whether a point `distance_km` away falls inside the radius (inclusive)
    pub fn contains(&self, distance_km: f64) -> bool {
        match self {
            Self::Limited(km) => distance_km <= f64::from(*km),
            Self::Unlimited => true,
        }
    }

    /// Apply a caller-supplied radius. The result never exceeds `self`.
    #[must_use]
    pub fn narrowed_to(self, override_km: Option<u32>) -> Self {
        match (self, override_km) {
            (radius, None) => radius,
            (Self::Unlimited, Some(km)) => Self::Limited(km),
            (Self::Limited(max), Some(km)) => Self::Limited(max.min(km)),
        }
    }

    /// Kilometres as shown to clients
    pub const fn wire_km(&self) -> u32 {
        match self {
            Self::Limited(km) => *km,
            Self::Unlimited => Self::UNLIMITED_WIRE_KM,
        }
    }
}

impl Default for ServiceRadius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ServiceRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}km", self.wire_km())
    }
}

impl Serialize for ServiceRadius {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.wire_km())
    }
}
