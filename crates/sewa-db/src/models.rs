//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Integer keys and numeric columns are cast in SQL so that every row decodes
//! into `i64` / `f64` regardless of the underlying column width.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use sewa_types::{
    Coordinate, Provider, ProviderId, SewaError, Society, SocietyId, Subscription, SubscriptionId,
    SubscriptionPlan,
};

/// Service provider row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ProviderRow {
    pub id: i64,
    pub business_name: String,
    pub provider_type: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_areas: Option<Json<serde_json::Value>>,
    pub verification_status: String,
    pub years_experience: Option<i32>,
    pub average_rating: Option<f64>,
    pub total_reviews: Option<i64>,
    pub is_active: Option<bool>,
}

/// Society row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SocietyRow {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub registration_number: Option<String>,
    pub total_members: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Current subscription joined with its plan
#[derive(Debug, Clone, FromRow)]
pub struct CurrentSubscriptionRow {
    pub id: i64,
    pub provider_id: i64,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub plan_id: i64,
    pub tier: String,
    pub plan_name: String,
    pub priority_ranking: Option<i32>,
    pub featured_listing: Option<bool>,
}

/// Booking row from the database
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
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

// Conversion implementations from Row types to sewa-types domain types

impl TryFrom<ProviderRow> for Provider {
    type Error = SewaError;

    fn try_from(row: ProviderRow) -> Result<Self, Self::Error> {
        Ok(Provider {
            id: ProviderId(row.id),
            provider_type: row.provider_type.parse()?,
            verification_status: row.verification_status.parse()?,
            coordinate: Coordinate::from_parts(row.latitude, row.longitude),
            service_areas: row
                .service_areas
                .map(|Json(value)| service_area_names(&value))
                .unwrap_or_default(),
            business_name: row.business_name,
            city: row.city.unwrap_or_default(),
            rating_average: row.average_rating.unwrap_or(0.0),
            rating_count: row.total_reviews.unwrap_or(0),
            is_active: row.is_active.unwrap_or(true),
            description: row.description,
            address: row.address,
            phone: row.phone,
            email: row.email,
            website: row.website,
            years_experience: row.years_experience,
        })
    }
}

/// Service areas are free-form JSON; only an array of strings is meaningful.
fn service_area_names(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|areas| {
            areas
                .iter()
                .filter_map(|area| area.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl From<SocietyRow> for Society {
    fn from(row: SocietyRow) -> Self {
        Society {
            id: SocietyId(row.id),
            name: row.name,
            city: row.city.unwrap_or_default(),
            coordinate: Coordinate::from_parts(row.latitude, row.longitude),
            address: row.address,
            registration_number: row.registration_number,
            total_members: row.total_members,
        }
    }
}

impl TryFrom<CurrentSubscriptionRow> for Subscription {
    type Error = SewaError;

    fn try_from(row: CurrentSubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId(row.id),
            provider_id: ProviderId(row.provider_id),
            plan: SubscriptionPlan {
                id: row.plan_id,
                tier: row.tier.parse()?,
                name: row.plan_name,
                priority_ranking: row.priority_ranking.unwrap_or(0),
                featured_listing: row.featured_listing.unwrap_or(false),
            },
            status: row.status.parse()?,
            start_date: row.start_date,
            end_date: row.end_date,
        })
    }
}
