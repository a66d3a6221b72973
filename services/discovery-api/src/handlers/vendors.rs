//! Society-facing vendor discovery

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;

use sewa_discovery::{SortMode, VendorEntry, VendorQuery};
use sewa_types::{Society, SocietyId};

use crate::error::ApiResult;
use crate::handlers::shared::{
    parse_provider_type, parse_sort_mode, record_op_duration, validate_page, validate_radius, DEFAULT_LIMIT,
};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct NearbyVendorsParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub radius_km: Option<i64>,
    pub provider_type: Option<String>,
    pub sort_by: Option<String>,
}

/// Vendor as listed to societies and in the general provider listing
#[derive(Debug, Serialize)]
pub struct VendorResponse {
    pub id: i64,
    pub business_name: String,
    pub provider_type: &'static str,
    pub description: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub years_experience: Option<i32>,
    pub is_verified: bool,
    pub verification_status: &'static str,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub subscription_tier: Option<&'static str>,
    pub is_featured: bool,
    pub is_sponsored: bool,
    pub distance_km: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SocietySummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NearbyVendorsResponse {
    pub vendors: Vec<VendorResponse>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub sort_by: SortMode,
    pub society: SocietySummary,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/societies/{society_id}/nearby-vendors
#[instrument(skip(state, params), fields(society_id = society_id, sort_by))]
pub async fn nearby_vendors(
    State(state): State<AppState>,
    Path(society_id): Path<i64>,
    Query(params): Query<NearbyVendorsParams>,
) -> ApiResult<Json<NearbyVendorsResponse>> {
    let start = Instant::now();

    let (skip, limit) = validate_page(params.skip, params.limit, DEFAULT_LIMIT)?;
    let query = VendorQuery {
        skip,
        limit,
        radius_km: validate_radius(params.radius_km)?,
        provider_type: parse_provider_type(params.provider_type.as_deref()),
        sort_by: parse_sort_mode(params.sort_by.as_deref())?,
    };
    tracing::Span::current().record("sort_by", query.sort_by.as_str());

    let result = state
        .discovery
        .nearby_vendors(SocietyId(society_id), &query)
        .await;
    record_op_duration("nearby_vendors", start, result.is_ok());
    let listing = result?;

    Ok(Json(NearbyVendorsResponse {
        total: listing.page.total,
        skip: listing.page.skip,
        limit: listing.page.limit,
        vendors: listing.page.items.into_iter().map(vendor_to_response).collect(),
        sort_by: listing.sort_by,
        society: society_summary(&listing.society),
    }))
}

pub(crate) fn vendor_to_response(entry: VendorEntry) -> VendorResponse {
    let VendorEntry {
        provider,
        tier,
        distance_km,
    } = entry;

    VendorResponse {
        id: provider.id.0,
        provider_type: provider.provider_type.as_str(),
        is_verified: provider.is_verified(),
        verification_status: provider.verification_status.as_str(),
        average_rating: provider.rating_average,
        total_reviews: provider.rating_count,
        subscription_tier: tier.tier.map(|t| t.as_str()),
        is_featured: tier.featured,
        is_sponsored: tier.is_sponsored(),
        distance_km,
        latitude: provider.coordinate.map(|c| c.latitude),
        longitude: provider.coordinate.map(|c| c.longitude),
        business_name: provider.business_name,
        description: provider.description,
        city: provider.city,
        address: provider.address,
        phone: provider.phone,
        email: provider.email,
        website: provider.website,
        years_experience: provider.years_experience,
    }
}

fn society_summary(society: &Society) -> SocietySummary {
    SocietySummary {
        id: society.id.0,
        name: society.name.clone(),
        city: society.city.clone(),
        latitude: society.coordinate.map(|c| c.latitude),
        longitude: society.coordinate.map(|c| c.longitude),
    }
}
