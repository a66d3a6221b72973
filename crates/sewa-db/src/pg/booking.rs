//! PostgreSQL booking repository implementation

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::BookingRow;
use crate::repo::{BookingRepository, CreateBooking};

/// PostgreSQL booking repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: CreateBooking) -> DbResult<BookingRow> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO service_bookings (booking_number, client_user_id, provider_id, service_id,
                                          society_id, status, service_name, description,
                                          requirements, requested_start_date, client_notes,
                                          created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'REQUESTED', $6, $7, $8::json, $9, $10, NOW(), NOW())
            RETURNING id::int8 AS id, booking_number, client_user_id::int8 AS client_user_id,
                      provider_id::int8 AS provider_id, service_id::int8 AS service_id,
                      society_id::int8 AS society_id, status::text AS status, service_name,
                      description, requested_start_date::timestamp AS requested_start_date,
                      created_at::timestamptz AS created_at
            "#,
        )
        .bind(&booking.booking_number)
        .bind(booking.client_user_id)
        .bind(booking.provider_id.0)
        .bind(booking.service_id)
        .bind(booking.society_id.map(|id| id.0))
        .bind(&booking.service_name)
        .bind(&booking.description)
        .bind(booking.requirements.map(Json))
        .bind(booking.requested_start_date)
        .bind(&booking.client_notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
