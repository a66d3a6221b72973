//! Shared handler utilities
//!
//! Query validation and metrics helpers used across handlers. Everything
//! past this boundary assumes validated input.

use std::time::Instant;

use sewa_discovery::{SortMode, MAX_PAGE_LIMIT};
use sewa_types::{Coordinate, ProviderType};

use crate::error::ApiError;

// ============================================================================
// Input Validation
// ============================================================================

/// Maximum length for user-provided strings
const MAX_STRING_LEN: usize = 256;

/// Page size when the caller omits `limit`
pub const DEFAULT_LIMIT: i64 = 50;

/// Validate `skip` and `limit` into a usable offset/limit pair.
pub fn validate_page(skip: Option<i64>, limit: Option<i64>, default_limit: i64) -> Result<(usize, usize), ApiError> {
    let skip = skip.unwrap_or(0);
    if skip < 0 {
        return Err(ApiError::BadRequest("skip must be >= 0".into()));
    }

    let limit = limit.unwrap_or(default_limit);
    if !(1..=MAX_PAGE_LIMIT as i64).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    // Both bounds checked above
    Ok((skip as usize, limit as usize))
}

/// Validate an optional caller radius override.
pub fn validate_radius(radius_km: Option<i64>) -> Result<Option<u32>, ApiError> {
    radius_km
        .map(|km| {
            u32::try_from(km)
                .ok()
                .filter(|km| *km >= 1)
                .ok_or_else(|| ApiError::BadRequest("radius_km must be a positive integer".into()))
        })
        .transpose()
}

/// Parse `sort_by`, defaulting to priority.
pub fn parse_sort_mode(sort_by: Option<&str>) -> Result<SortMode, ApiError> {
    sort_by
        .map(|s| s.parse::<SortMode>().map_err(ApiError::BadRequest))
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse a provider type filter. Unknown values are ignored.
pub fn parse_provider_type(provider_type: Option<&str>) -> Option<ProviderType> {
    let raw = provider_type?;
    match raw.parse() {
        Ok(provider_type) => Some(provider_type),
        Err(e) => {
            tracing::debug!(provider_type = raw, error = %e, "Ignoring unknown provider_type filter");
            None
        }
    }
}

/// Validate an optional requester location. Both halves or neither.
pub fn validate_coordinate(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Coordinate>, ApiError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => {
            let coordinate = Coordinate::new(latitude, longitude);
            if coordinate.is_in_range() {
                Ok(Some(coordinate))
            } else {
                Err(ApiError::BadRequest(
                    "latitude must be within [-90, 90] and longitude within [-180, 180]".into(),
                ))
            }
        }
        _ => Err(ApiError::BadRequest(
            "latitude and longitude must be given together".into(),
        )),
    }
}

/// Validate a user-provided string is within safe bounds.
pub fn validate_string_length(value: &str, field_name: &str) -> Result<(), ApiError> {
    if value.len() > MAX_STRING_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field_name} too long (max {MAX_STRING_LEN} chars)"
        )));
    }
    Ok(())
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "discovery_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

/// Count a booking refused by the eligibility gate.
#[inline]
pub fn record_booking_rejected(reason: &'static str) {
    metrics::counter!(
        "discovery_bookings_rejected_total",
        "reason" => reason
    )
    .increment(1);
}

// ============================================================================
// Tests
// ============================================================================
