//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use sewa_types::{ProviderId, ProviderType, SocietyId};

use crate::error::DbResult;
use crate::models::*;

/// Provider repository trait
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Find a provider by ID
    async fn find_by_id(&self, id: ProviderId) -> DbResult<Option<ProviderRow>>;

    /// Load every provider matching the filter
    async fn list(&self, filter: &ProviderFilter) -> DbResult<Vec<ProviderRow>>;
}

/// Storage-side provider filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter {
    /// Only providers with `is_active = true`
    pub active_only: bool,
    /// Only providers with verification status `VERIFIED`
    pub verified_only: bool,
    /// Restrict to one line of business
    pub provider_type: Option<ProviderType>,
    /// Case-insensitive substring match on the provider's city
    pub city_contains: Option<String>,
}

impl ProviderFilter {
    /// Active, verified providers: the set societies may discover
    pub fn listed() -> Self {
        Self {
            active_only: true,
            verified_only: true,
            ..Self::default()
        }
    }

    /// Restrict to a provider type
    pub fn with_provider_type(mut self, provider_type: Option<ProviderType>) -> Self {
        self.provider_type = provider_type;
        self
    }
}

/// Society repository trait
#[async_trait]
pub trait SocietyRepository: Send + Sync {
    /// Find a society by ID
    async fn find_by_id(&self, id: SocietyId) -> DbResult<Option<SocietyRow>>;

    /// Load every verified, active society
    async fn list_listed(&self) -> DbResult<Vec<SocietyRow>>;
}

/// Subscription repository trait
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetch, in one query, every subscription with status `ACTIVE` and
    /// `end_date >= today` for the given providers, joined with its plan
    async fn find_current_for_providers(
        &self,
        provider_ids: &[ProviderId],
        today: NaiveDate,
    ) -> DbResult<Vec<CurrentSubscriptionRow>>;
}

/// Booking repository trait
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a new booking in `REQUESTED` status
    async fn create(&self, booking: CreateBooking) -> DbResult<BookingRow>;
}

/// Create booking input
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub booking_number: String,
    pub client_user_id: i64,
    pub provider_id: ProviderId,
    pub service_id: Option<i64>,
    pub society_id: Option<SocietyId>,
    pub service_name: String,
    pub description: Option<String>,
    pub requirements: Option<serde_json::Value>,
    pub requested_start_date: Option<NaiveDateTime>,
    pub client_notes: Option<String>,
}
