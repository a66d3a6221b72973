//! Booking creation behind the service-area gate

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::instrument;

use sewa_db::{BookingRepository, BookingRow, CreateBooking};
use sewa_discovery::{new_booking_number, DiscoveryError};
use sewa_types::{ProviderId, SocietyId};

use crate::error::{ApiError, ApiResult};
use crate::handlers::shared::{record_booking_rejected, record_op_duration, validate_string_length};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub client_user_id: i64,
    pub provider_id: i64,
    pub society_id: Option<i64>,
    pub service_id: Option<i64>,
    pub service_name: String,
    pub description: Option<String>,
    pub requirements: Option<serde_json::Value>,
    pub requested_start_date: Option<NaiveDateTime>,
    pub client_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub booking_number: String,
    pub client_user_id: i64,
    pub provider_id: i64,
    pub service_id: Option<i64>,
    pub society_id: Option<i64>,
    pub status: String,
    pub service_name: String,
    pub description: Option<String>,
    pub requested_start_date: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/bookings
#[instrument(
    skip(state, req),
    fields(provider_id = req.provider_id, society_id = ?req.society_id)
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let start = Instant::now();
    let result = create_booking_inner(&state, req).await;
    record_op_duration("create_booking", start, result.is_ok());
    let row = result?;

    tracing::info!(
        booking_id = row.id,
        booking_number = %row.booking_number,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(booking_to_response(row))))
}

async fn create_booking_inner(state: &AppState, req: CreateBookingRequest) -> ApiResult<BookingRow> {
    if req.service_name.trim().is_empty() {
        return Err(ApiError::BadRequest("service_name cannot be empty".into()));
    }
    validate_string_length(&req.service_name, "service_name")?;

    let provider_id = ProviderId(req.provider_id);
    let society_id = req.society_id.map(SocietyId);

    // Bookings without a society skip the location check
    match society_id {
        Some(society_id) => {
            state
                .discovery
                .check_booking(provider_id, society_id)
                .await
                .map_err(|e| {
                    if let DiscoveryError::Ineligible(rejection) = &e {
                        record_booking_rejected(rejection.reason.as_str());
                    }
                    ApiError::from(e)
                })?;
        }
        None => {
            state.discovery.provider(provider_id).await?;
        }
    }

    let booking = CreateBooking {
        booking_number: new_booking_number(),
        client_user_id: req.client_user_id,
        provider_id,
        service_id: req.service_id,
        society_id,
        service_name: req.service_name,
        description: req.description,
        requirements: req.requirements,
        requested_start_date: req.requested_start_date,
        client_notes: req.client_notes,
    };

    Ok(state.repos.bookings.create(booking).await?)
}

fn booking_to_response(row: BookingRow) -> BookingResponse {
    BookingResponse {
        id: row.id,
        booking_number: row.booking_number,
        client_user_id: row.client_user_id,
        provider_id: row.provider_id,
        service_id: row.service_id,
        society_id: row.society_id,
        status: row.status.to_lowercase(),
        service_name: row.service_name,
        description: row.description,
        requested_start_date: row.requested_start_date,
        created_at: row.created_at,
    }
}
