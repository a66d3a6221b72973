//! Provider/counterpart eligibility
//!
//! Rules, first applicable wins:
//! 1. Both sides located: eligible iff the distance is within the radius.
//! 2. Either side has no city on record: no check.
//! 3. Otherwise the configured [`CityFallback`] decides.

use serde::{Deserialize, Serialize};

use sewa_types::{Coordinate, Provider, ServiceRadius, Society};

use crate::geo;
use crate::resolver::ResolvedTier;

/// Anything with a city and an optional location
pub trait Located {
    /// City name as stored
    fn city(&self) -> &str;

    /// Location, if geocoded
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for Provider {
    fn city(&self) -> &str {
        &self.city
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl Located for Society {
    fn city(&self) -> &str {
        &self.city
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// What happens when a distance cannot be computed.
///
/// Listing and booking historically disagreed here; both behaviours are kept
/// behind this flag until one is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityFallback {
    /// Same city or declared service area. Tier is not consulted.
    #[default]
    CityMatch,
    /// Same city or declared service area, otherwise only tiers that serve other cities
    TierGated,
    /// No check at all without coordinates
    Skip,
}

impl std::str::FromStr for CityFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "city_match" => Ok(Self::CityMatch),
            "tier_gated" => Ok(Self::TierGated),
            "skip" => Ok(Self::Skip),
            _ => Err(format!("invalid city fallback: {s}")),
        }
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    /// Both located, inside the radius
    WithinRadius { distance_km: f64 },
    /// Both located, outside the radius
    OutOfRadius { distance_km: f64, max_radius: ServiceRadius },
    /// Same city, compared case-insensitively
    SameCity,
    /// Counterpart city is one of the provider's service areas
    ServiceArea,
    /// Different city, allowed by the provider's tier
    TierWaiver,
    /// Different city and nothing allows it
    CityMismatch,
    /// No location check applied
    Unchecked,
}

impl Eligibility {
    /// Whether the pair may be listed or booked
    pub fn is_eligible(&self) -> bool {
        !matches!(self, Self::OutOfRadius { .. } | Self::CityMismatch)
    }

    /// Computed distance, if both sides were located
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            Self::WithinRadius { distance_km } | Self::OutOfRadius { distance_km, .. } => {
                Some(*distance_km)
            }
            _ => None,
        }
    }

    /// Whether the decision fell back to city names
    pub fn used_city_fallback(&self) -> bool {
        matches!(
            self,
            Self::SameCity | Self::ServiceArea | Self::TierWaiver | Self::CityMismatch
        )
    }
}

/// Applies the eligibility rules with a fixed fallback policy
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter {
    fallback: CityFallback,
}

impl EligibilityFilter {
    /// Create a filter
    pub const fn new(fallback: CityFallback) -> Self {
        Self { fallback }
    }

    /// Configured fallback policy
    pub const fn fallback(&self) -> CityFallback {
        self.fallback
    }

    /// Evaluate with the provider's own tier radius
    pub fn evaluate(
        &self,
        provider: &Provider,
        tier: &ResolvedTier,
        counterpart: &impl Located,
    ) -> Eligibility {
        self.evaluate_within(provider, tier, counterpart, tier.max_radius)
    }

    /// Evaluate against an explicit radius, e.g. a caller-narrowed one
    pub fn evaluate_within(
        &self,
        provider: &Provider,
        tier: &ResolvedTier,
        counterpart: &impl Located,
        radius: ServiceRadius,
    ) -> Eligibility {
        if let Some(distance_km) = geo::distance_km(provider.coordinate, counterpart.coordinate()) {
            return if radius.contains(distance_km) {
                Eligibility::WithinRadius { distance_km }
            } else {
                Eligibility::OutOfRadius {
                    distance_km,
                    max_radius: radius,
                }
            };
        }

        if provider.city.trim().is_empty() || counterpart.city().trim().is_empty() {
            return Eligibility::Unchecked;
        }

        match self.fallback {
            CityFallback::Skip => Eligibility::Unchecked,
            CityFallback::CityMatch => city_match(provider, counterpart),
            CityFallback::TierGated => match city_match(provider, counterpart) {
                Eligibility::CityMismatch if tier.serves_other_cities() => Eligibility::TierWaiver,
                verdict => verdict,
            },
        }
    }

    /// Boolean projection of [`EligibilityFilter::evaluate`]
    pub fn is_eligible(
        &self,
        provider: &Provider,
        tier: &ResolvedTier,
        counterpart: &impl Located,
    ) -> bool {
        self.evaluate(provider, tier, counterpart).is_eligible()
    }
}

/// Case-folded exact city comparison, then the service-area override
fn city_match(provider: &Provider, counterpart: &impl Located) -> Eligibility {
    let city = counterpart.city();
    if provider.city.to_lowercase() == city.to_lowercase() {
        Eligibility::SameCity
    } else if provider.serves_area(city) {
        Eligibility::ServiceArea
    } else {
        Eligibility::CityMismatch
    }
}
