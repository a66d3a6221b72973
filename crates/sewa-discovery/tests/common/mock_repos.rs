//! Mock repositories for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use sewa_db::{
    CurrentSubscriptionRow, DbResult, ProviderFilter, ProviderRepository, ProviderRow,
    SocietyRepository, SocietyRow, SubscriptionRepository,
};
use sewa_types::{ProviderId, ProviderType, SocietyId, Tier};

/// In-memory provider repository for testing
#[derive(Default, Clone)]
pub struct MockProviderRepository {
    providers: Arc<DashMap<i64, ProviderRow>>,
}

impl MockProviderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test provider directly
    pub fn insert(&self, row: ProviderRow) {
        self.providers.insert(row.id, row);
    }
}

#[async_trait]
impl ProviderRepository for MockProviderRepository {
    async fn find_by_id(&self, id: ProviderId) -> DbResult<Option<ProviderRow>> {
        Ok(self.providers.get(&id.0).map(|r| r.value().clone()))
    }

    async fn list(&self, filter: &ProviderFilter) -> DbResult<Vec<ProviderRow>> {
        let mut rows: Vec<ProviderRow> = self
            .providers
            .iter()
            .map(|r| r.value().clone())
            .filter(|row| !filter.active_only || row.is_active.unwrap_or(true))
            .filter(|row| {
                !filter.verified_only || row.verification_status.eq_ignore_ascii_case("verified")
            })
            .filter(|row| {
                filter.provider_type.map_or(true, |wanted| {
                    row.provider_type.parse::<ProviderType>().ok() == Some(wanted)
                })
            })
            .filter(|row| {
                filter.city_contains.as_ref().map_or(true, |needle| {
                    row.city
                        .as_deref()
                        .is_some_and(|city| city.to_lowercase().contains(&needle.to_lowercase()))
                })
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }
}

/// In-memory society repository for testing
#[derive(Default, Clone)]
pub struct MockSocietyRepository {
    societies: Arc<DashMap<i64, SocietyRow>>,
}

impl MockSocietyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test society directly
    pub fn insert(&self, row: SocietyRow) {
        self.societies.insert(row.id, row);
    }
}

#[async_trait]
impl SocietyRepository for MockSocietyRepository {
    async fn find_by_id(&self, id: SocietyId) -> DbResult<Option<SocietyRow>> {
        Ok(self.societies.get(&id.0).map(|r| r.value().clone()))
    }

    async fn list_listed(&self) -> DbResult<Vec<SocietyRow>> {
        let mut rows: Vec<SocietyRow> = self.societies.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }
}

/// In-memory subscription repository for testing
#[derive(Default, Clone)]
pub struct MockSubscriptionRepository {
    subscriptions: Arc<DashMap<i64, CurrentSubscriptionRow>>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test subscription directly
    pub fn insert(&self, row: CurrentSubscriptionRow) {
        self.subscriptions.insert(row.id, row);
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn find_current_for_providers(
        &self,
        provider_ids: &[ProviderId],
        today: NaiveDate,
    ) -> DbResult<Vec<CurrentSubscriptionRow>> {
        Ok(self
            .subscriptions
            .iter()
            .map(|r| r.value().clone())
            .filter(|row| provider_ids.contains(&ProviderId(row.provider_id)))
            .filter(|row| row.status.eq_ignore_ascii_case("active") && row.end_date >= today)
            .collect())
    }
}

/// Verified, active provider row
#[allow(dead_code)]
pub fn provider_row(id: i64, city: &str, location: Option<(f64, f64)>) -> ProviderRow {
    ProviderRow {
        id,
        business_name: format!("Vendor {id}"),
        provider_type: "TECHNICAL".to_string(),
        description: None,
        city: Some(city.to_string()),
        address: None,
        phone: None,
        email: None,
        website: None,
        latitude: location.map(|(lat, _)| lat),
        longitude: location.map(|(_, lon)| lon),
        service_areas: None,
        verification_status: "VERIFIED".to_string(),
        years_experience: None,
        average_rating: Some(4.0),
        total_reviews: Some(10),
        is_active: Some(true),
    }
}

/// Society row
#[allow(dead_code)]
pub fn society_row(id: i64, city: &str, location: Option<(f64, f64)>) -> SocietyRow {
    SocietyRow {
        id,
        name: format!("Society {id}"),
        city: Some(city.to_string()),
        address: None,
        registration_number: None,
        total_members: None,
        latitude: location.map(|(lat, _)| lat),
        longitude: location.map(|(_, lon)| lon),
    }
}

/// Active subscription row ending on `end_date`
#[allow(dead_code)]
pub fn subscription_row(
    id: i64,
    provider_id: i64,
    tier: Tier,
    priority_ranking: i32,
    featured: bool,
    end_date: NaiveDate,
) -> CurrentSubscriptionRow {
    CurrentSubscriptionRow {
        id,
        provider_id,
        status: "ACTIVE".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date,
        plan_id: id * 100,
        tier: tier.as_str().to_uppercase(),
        plan_name: tier.to_string(),
        priority_ranking: Some(priority_ranking),
        featured_listing: Some(featured),
    }
}
