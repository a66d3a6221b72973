//! Vendor-facing society discovery

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;

use sewa_discovery::{SocietyEntry, SocietyQuery};
use sewa_types::{ProviderId, ServiceRadius};

use crate::error::ApiResult;
use crate::handlers::shared::{record_op_duration, validate_page, validate_radius, DEFAULT_LIMIT};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct NearbySocietiesParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub radius_km: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SocietyResponse {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub registration_number: Option<String>,
    pub total_members: Option<i32>,
    pub distance_km: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NearbySocietiesResponse {
    pub societies: Vec<SocietyResponse>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub subscription_tier: Option<&'static str>,
    pub max_radius_km: ServiceRadius,
    pub search_radius_km: ServiceRadius,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/providers/{provider_id}/nearby-societies
#[instrument(skip(state, params), fields(provider_id = provider_id))]
pub async fn nearby_societies(
    State(state): State<AppState>,
    Path(provider_id): Path<i64>,
    Query(params): Query<NearbySocietiesParams>,
) -> ApiResult<Json<NearbySocietiesResponse>> {
    let start = Instant::now();

    let (skip, limit) = validate_page(params.skip, params.limit, DEFAULT_LIMIT)?;
    let query = SocietyQuery {
        skip,
        limit,
        radius_km: validate_radius(params.radius_km)?,
    };

    let result = state
        .discovery
        .nearby_societies(ProviderId(provider_id), &query)
        .await;
    record_op_duration("nearby_societies", start, result.is_ok());
    let listing = result?;

    Ok(Json(NearbySocietiesResponse {
        total: listing.page.total,
        skip: listing.page.skip,
        limit: listing.page.limit,
        subscription_tier: listing.tier.tier.map(|t| t.as_str()),
        max_radius_km: listing.max_radius(),
        search_radius_km: listing.search_radius,
        note: listing.note,
        societies: listing.page.items.into_iter().map(society_to_response).collect(),
    }))
}

fn society_to_response(entry: SocietyEntry) -> SocietyResponse {
    let SocietyEntry {
        society,
        distance_km,
    } = entry;

    SocietyResponse {
        id: society.id.0,
        latitude: society.coordinate.map(|c| c.latitude),
        longitude: society.coordinate.map(|c| c.longitude),
        name: society.name,
        city: society.city,
        address: society.address,
        registration_number: society.registration_number,
        total_members: society.total_members,
        distance_km,
    }
}
