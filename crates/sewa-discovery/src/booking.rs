//! Booking-time eligibility gate
//!
//! Runs before a booking is persisted. A rejection carries the concrete
//! radius and distance so the client can explain it.

use serde::Serialize;

use sewa_types::{Provider, ServiceRadius, Society};

use crate::eligibility::{CityFallback, Eligibility, EligibilityFilter};
use crate::resolver::ResolvedTier;

/// Why a booking was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Distance exceeds the tier radius
    OutOfRadius,
    /// Different city and the tier does not cover it
    OutsideCity,
}

impl RejectionReason {
    /// Wire name, also used as a metrics label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRadius => "out_of_radius",
            Self::OutsideCity => "outside_city",
        }
    }
}

/// A refused booking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rejection {
    /// Radius the provider's tier allows
    #[serde(rename = "max_radius_km")]
    pub max_radius: ServiceRadius,
    /// Computed distance, when both sides are located
    pub distance_km: Option<f64>,
    pub reason: RejectionReason,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.reason, self.distance_km) {
            (RejectionReason::OutOfRadius, Some(distance)) => write!(
                f,
                "Provider can only serve societies within {}km. Distance: {distance:.1}km. \
                 Upgrade subscription to serve wider area.",
                self.max_radius.wire_km()
            ),
            (RejectionReason::OutOfRadius, None) => write!(
                f,
                "Provider can only serve societies within {}km. \
                 Upgrade subscription to serve wider area.",
                self.max_radius.wire_km()
            ),
            (RejectionReason::OutsideCity, _) => f.write_str(
                "Provider can only serve societies in the same city. \
                 Upgrade subscription to serve wider area.",
            ),
        }
    }
}

/// Eligibility gate applied when a booking is created
#[derive(Debug, Clone, Copy)]
pub struct BookingEligibilityGate {
    filter: EligibilityFilter,
}

impl BookingEligibilityGate {
    /// Create a gate with the given city fallback
    pub const fn new(fallback: CityFallback) -> Self {
        Self {
            filter: EligibilityFilter::new(fallback),
        }
    }

    /// Configured fallback policy
    pub const fn fallback(&self) -> CityFallback {
        self.filter.fallback()
    }

    /// Accept or reject a provider for a society. All-or-nothing.
    pub fn check_booking_allowed(
        &self,
        provider: &Provider,
        tier: &ResolvedTier,
        society: &Society,
    ) -> Result<Eligibility, Rejection> {
        match self.filter.evaluate(provider, tier, society) {
            Eligibility::OutOfRadius {
                distance_km,
                max_radius,
            } => Err(Rejection {
                max_radius,
                distance_km: Some(distance_km),
                reason: RejectionReason::OutOfRadius,
            }),
            Eligibility::CityMismatch => Err(Rejection {
                max_radius: tier.max_radius,
                distance_km: None,
                reason: RejectionReason::OutsideCity,
            }),
            verdict => Ok(verdict),
        }
    }
}

impl Default for BookingEligibilityGate {
    fn default() -> Self {
        Self::new(CityFallback::TierGated)
    }
}

/// Human-facing booking reference, `BK-` followed by 8 uppercase hex digits
pub fn new_booking_number() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("BK-{}", &id[..8])
}
