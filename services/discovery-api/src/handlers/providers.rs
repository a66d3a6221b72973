//! General provider listing

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;

use sewa_discovery::{ProviderQuery, SortMode};

use crate::error::ApiResult;
use crate::handlers::shared::{
    parse_provider_type, parse_sort_mode, record_op_duration, validate_coordinate, validate_page,
    validate_string_length,
};
use crate::handlers::vendors::{vendor_to_response, VendorResponse};
use crate::state::AppState;

/// The general listing pages in larger chunks than the nearby listings
const PROVIDERS_DEFAULT_LIMIT: i64 = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListProvidersParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub verified_only: bool,
    pub provider_type: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    #[serde(flatten)]
    pub vendor: VendorResponse,
    /// Tier name, or `"none"` without a current subscription
    pub subscription_status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListProvidersResponse {
    pub providers: Vec<ProviderSummary>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub sort_by: SortMode,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/providers
#[instrument(skip(state, params), fields(sort_by))]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<ListProvidersParams>,
) -> ApiResult<Json<ListProvidersResponse>> {
    let start = Instant::now();

    let (skip, limit) = validate_page(params.skip, params.limit, PROVIDERS_DEFAULT_LIMIT)?;
    if let Some(city) = params.city.as_deref() {
        validate_string_length(city, "city")?;
    }

    let query = ProviderQuery {
        requester: validate_coordinate(params.latitude, params.longitude)?,
        verified_only: params.verified_only,
        provider_type: parse_provider_type(params.provider_type.as_deref()),
        city: params.city.filter(|c| !c.trim().is_empty()),
        sort_by: parse_sort_mode(params.sort_by.as_deref())?,
        skip,
        limit,
    };
    tracing::Span::current().record("sort_by", query.sort_by.as_str());

    let result = state.discovery.list_providers(&query).await;
    record_op_duration("list_providers", start, result.is_ok());
    let listing = result?;

    Ok(Json(ListProvidersResponse {
        total: listing.page.total,
        skip: listing.page.skip,
        limit: listing.page.limit,
        sort_by: listing.sort_by,
        providers: listing
            .page
            .items
            .into_iter()
            .map(|entry| {
                let subscription_status = entry.tier.tier.map_or("none", |t| t.as_str());
                ProviderSummary {
                    vendor: vendor_to_response(entry),
                    subscription_status,
                }
            })
            .collect(),
    }))
}
