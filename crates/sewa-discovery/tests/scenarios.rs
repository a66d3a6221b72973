//! End-to-end discovery scenarios over in-memory repositories

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{
    provider_row, society_row, subscription_row, MockProviderRepository, MockSocietyRepository,
    MockSubscriptionRepository,
};
use sewa_discovery::{
    CityFallback, DiscoveryConfig, DiscoveryError, DiscoveryService, Eligibility, ProviderQuery,
    RadiusOverride, RejectionReason, SocietyQuery, SortMode, VendorQuery, CITY_FALLBACK_NOTE,
};
use sewa_types::{Coordinate, ProviderId, ProviderType, ServiceRadius, SocietyId, Tier};

const MUMBAI: (f64, f64) = (19.0760, 72.8777);
const NEAR_MUMBAI: (f64, f64) = (19.1000, 72.9000);
const THANE: (f64, f64) = (19.2183, 72.9781);
const PUNE: (f64, f64) = (18.5204, 73.8567);

type Service = DiscoveryService<MockProviderRepository, MockSocietyRepository, MockSubscriptionRepository>;

struct Fixture {
    providers: MockProviderRepository,
    societies: MockSocietyRepository,
    subscriptions: MockSubscriptionRepository,
}

impl Fixture {
    fn new() -> Self {
        Self {
            providers: MockProviderRepository::new(),
            societies: MockSocietyRepository::new(),
            subscriptions: MockSubscriptionRepository::new(),
        }
    }

    fn service(&self) -> Service {
        self.service_with(DiscoveryConfig::default())
    }

    fn service_with(&self, config: DiscoveryConfig) -> Service {
        DiscoveryService::new(
            Arc::new(self.providers.clone()),
            Arc::new(self.societies.clone()),
            Arc::new(self.subscriptions.clone()),
            config,
        )
        .with_today(today())
    }

    fn subscribe(&self, id: i64, provider_id: i64, tier: Tier) {
        self.subscriptions
            .insert(subscription_row(id, provider_id, tier, 0, false, year_end()));
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn year_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
}

fn vendor_ids(listing: &sewa_discovery::VendorListing) -> Vec<i64> {
    listing.page.items.iter().map(|v| v.provider.id.0).collect()
}

#[tokio::test]
async fn test_basic_tier_serves_within_ten_km_only() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscribe(1, 1, Tier::BasicMonthly);
    fx.societies.insert(society_row(1, "Mumbai", Some(NEAR_MUMBAI)));
    fx.societies.insert(society_row(2, "Pune", Some(PUNE)));
    let service = fx.service();

    let near = service.nearby_vendors(SocietyId(1), &VendorQuery::default()).await.unwrap();
    assert_eq!(vendor_ids(&near), vec![1]);
    let entry = &near.page.items[0];
    assert_eq!(entry.tier.tier, Some(Tier::BasicMonthly));
    assert!(entry.distance_km.is_some_and(|d| d > 2.0 && d < 5.0));

    let far = service.nearby_vendors(SocietyId(2), &VendorQuery::default()).await.unwrap();
    assert!(far.page.items.is_empty());
    assert_eq!(far.page.total, 0);
}

#[tokio::test]
async fn test_premium_tier_widens_radius_but_not_to_pune() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscribe(1, 1, Tier::PremiumYearly);
    fx.societies.insert(society_row(1, "Mumbai", Some(NEAR_MUMBAI)));
    fx.societies.insert(society_row(2, "Pune", Some(PUNE)));
    fx.societies.insert(society_row(3, "Thane", Some(THANE)));
    let service = fx.service();

    let listing = service
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();

    let ids: Vec<i64> = listing.page.items.iter().map(|s| s.society.id.0).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(listing.max_radius(), ServiceRadius::Limited(25));
    assert_eq!(listing.search_radius, ServiceRadius::Limited(25));
    assert_eq!(listing.note, None);
}

#[tokio::test]
async fn test_unlocated_pair_falls_back_to_city_case_insensitively() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(2, "Thane", None));
    fx.societies.insert(society_row(3, "thane", None));

    let listing = fx
        .service()
        .nearby_vendors(SocietyId(3), &VendorQuery::default())
        .await
        .unwrap();

    assert_eq!(vendor_ids(&listing), vec![2]);
    assert_eq!(listing.page.items[0].distance_km, None);
    assert_eq!(listing.page.items[0].tier.tier, None);
}

#[tokio::test]
async fn test_featured_tie_broken_by_rating() {
    let fx = Fixture::new();
    let mut a = provider_row(10, "Mumbai", Some(NEAR_MUMBAI));
    a.average_rating = Some(4.5);
    let mut b = provider_row(11, "Mumbai", Some(NEAR_MUMBAI));
    b.average_rating = Some(4.8);
    fx.providers.insert(a);
    fx.providers.insert(b);
    fx.subscriptions
        .insert(subscription_row(1, 10, Tier::EliteYearly, 5, true, year_end()));
    fx.subscriptions
        .insert(subscription_row(2, 11, Tier::EliteYearly, 5, true, year_end()));
    fx.societies.insert(society_row(1, "Mumbai", Some(MUMBAI)));

    let listing = fx
        .service()
        .nearby_vendors(SocietyId(1), &VendorQuery::default())
        .await
        .unwrap();

    assert_eq!(vendor_ids(&listing), vec![11, 10]);
    assert!(listing.page.items.iter().all(|v| v.tier.featured && v.tier.is_sponsored()));
}

#[tokio::test]
async fn test_sponsored_vendor_outranks_closer_unsubscribed_one() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.providers.insert(provider_row(2, "Mumbai", Some(THANE)));
    fx.subscriptions
        .insert(subscription_row(1, 2, Tier::PremiumMonthly, 3, false, year_end()));
    fx.societies.insert(society_row(1, "Mumbai", Some(MUMBAI)));
    let service = fx.service();

    let by_priority = service.nearby_vendors(SocietyId(1), &VendorQuery::default()).await.unwrap();
    assert_eq!(vendor_ids(&by_priority), vec![2, 1]);

    let query = VendorQuery {
        sort_by: SortMode::Distance,
        ..VendorQuery::default()
    };
    let by_distance = service.nearby_vendors(SocietyId(1), &query).await.unwrap();
    assert_eq!(vendor_ids(&by_distance), vec![1, 2]);
    assert_eq!(by_distance.sort_by, SortMode::Distance);
}

#[tokio::test]
async fn test_partial_last_page() {
    let fx = Fixture::new();
    for id in 1..=7 {
        fx.providers.insert(provider_row(id, "Pune", None));
    }
    fx.societies.insert(society_row(1, "Pune", None));

    let query = VendorQuery {
        skip: 5,
        limit: 10,
        ..VendorQuery::default()
    };
    let listing = fx.service().nearby_vendors(SocietyId(1), &query).await.unwrap();

    assert_eq!(vendor_ids(&listing), vec![6, 7]);
    assert_eq!(listing.page.total, 7);
    assert_eq!((listing.page.skip, listing.page.limit), (5, 10));
}

#[tokio::test]
async fn test_vendor_radius_override_only_narrows() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Thane", Some(THANE)));
    fx.subscribe(1, 1, Tier::PremiumYearly);
    fx.providers.insert(provider_row(2, "Mumbai", Some(NEAR_MUMBAI)));
    fx.subscribe(2, 2, Tier::BasicMonthly);
    fx.societies.insert(society_row(1, "Mumbai", Some(MUMBAI)));
    let service = fx.service();

    let narrowed = VendorQuery {
        radius_km: Some(5),
        ..VendorQuery::default()
    };
    let listing = service.nearby_vendors(SocietyId(1), &narrowed).await.unwrap();
    assert_eq!(vendor_ids(&listing), vec![2]);

    let widened = VendorQuery {
        radius_km: Some(500),
        ..VendorQuery::default()
    };
    let listing = service.nearby_vendors(SocietyId(1), &widened).await.unwrap();
    assert_eq!(listing.page.total, 2);
}

#[tokio::test]
async fn test_society_radius_override_replaces_tier_radius() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscribe(1, 1, Tier::BasicMonthly);
    fx.societies.insert(society_row(1, "Thane", Some(THANE)));
    let wide = SocietyQuery {
        radius_km: Some(50),
        ..SocietyQuery::default()
    };

    let service = fx.service();
    let default_listing = service
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();
    assert_eq!(default_listing.page.total, 0);

    let listing = service.nearby_societies(ProviderId(1), &wide).await.unwrap();
    assert_eq!(listing.search_radius, ServiceRadius::Limited(50));
    assert_eq!(listing.max_radius(), ServiceRadius::Limited(10));
    assert_eq!(listing.page.total, 1);

    let narrowing = fx.service_with(DiscoveryConfig::new().with_society_radius_override(RadiusOverride::Narrow));
    let listing = narrowing.nearby_societies(ProviderId(1), &wide).await.unwrap();
    assert_eq!(listing.search_radius, ServiceRadius::Limited(10));
    assert_eq!(listing.page.total, 0);
}

#[tokio::test]
async fn test_provider_without_city_is_listed_and_bookable() {
    let fx = Fixture::new();
    let mut cityless = provider_row(1, "", None);
    cityless.city = None;
    fx.providers.insert(cityless);
    fx.subscribe(1, 1, Tier::BasicMonthly);
    fx.societies.insert(society_row(1, "Mumbai", None));
    let service = fx.service();

    let listing = service
        .nearby_vendors(SocietyId(1), &VendorQuery::default())
        .await
        .unwrap();
    assert_eq!(vendor_ids(&listing), vec![1]);
    assert_eq!(listing.page.items[0].distance_km, None);

    let check = service.check_booking(ProviderId(1), SocietyId(1)).await.unwrap();
    assert_eq!(check.eligibility, Eligibility::Unchecked);
}

#[tokio::test]
async fn test_society_without_city_is_visible_to_unlocated_provider() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", None));
    let mut cityless = society_row(1, "", None);
    cityless.city = None;
    fx.societies.insert(cityless);
    fx.societies.insert(society_row(2, "Pune", None));
    let service = fx.service();

    let listing = service
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();
    let ids: Vec<i64> = listing.page.items.iter().map(|s| s.society.id.0).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(listing.note, Some(CITY_FALLBACK_NOTE));

    let check = service.check_booking(ProviderId(1), SocietyId(1)).await.unwrap();
    assert_eq!(check.eligibility, Eligibility::Unchecked);
}

#[tokio::test]
async fn test_provider_type_filter() {
    let fx = Fixture::new();
    let mut legal = provider_row(1, "Mumbai", None);
    legal.provider_type = "LEGAL".to_string();
    fx.providers.insert(legal);
    fx.providers.insert(provider_row(2, "Mumbai", None));
    fx.societies.insert(society_row(1, "Mumbai", None));

    let query = VendorQuery {
        provider_type: Some(ProviderType::Legal),
        ..VendorQuery::default()
    };
    let listing = fx.service().nearby_vendors(SocietyId(1), &query).await.unwrap();
    assert_eq!(vendor_ids(&listing), vec![1]);
}

#[tokio::test]
async fn test_unverified_and_inactive_providers_hidden() {
    let fx = Fixture::new();
    let mut pending = provider_row(1, "Mumbai", None);
    pending.verification_status = "PENDING".to_string();
    let mut inactive = provider_row(2, "Mumbai", None);
    inactive.is_active = Some(false);
    fx.providers.insert(pending);
    fx.providers.insert(inactive);
    fx.providers.insert(provider_row(3, "Mumbai", None));
    fx.societies.insert(society_row(1, "Mumbai", None));

    let listing = fx
        .service()
        .nearby_vendors(SocietyId(1), &VendorQuery::default())
        .await
        .unwrap();
    assert_eq!(vendor_ids(&listing), vec![3]);
}

#[tokio::test]
async fn test_expired_subscription_falls_back_to_default_radius() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Thane", Some(THANE)));
    fx.subscriptions.insert(subscription_row(
        1,
        1,
        Tier::EliteYearly,
        9,
        true,
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
    ));
    fx.societies.insert(society_row(1, "Mumbai", Some(MUMBAI)));

    let listing = fx
        .service()
        .nearby_vendors(SocietyId(1), &VendorQuery::default())
        .await
        .unwrap();
    assert!(listing.page.items.is_empty());
}

#[tokio::test]
async fn test_unreadable_tier_is_treated_as_unsubscribed() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(NEAR_MUMBAI)));
    let mut row = subscription_row(1, 1, Tier::EliteYearly, 9, true, year_end());
    row.tier = "GOLD".to_string();
    fx.subscriptions.insert(row);
    fx.societies.insert(society_row(1, "Mumbai", Some(MUMBAI)));

    let listing = fx
        .service()
        .nearby_vendors(SocietyId(1), &VendorQuery::default())
        .await
        .unwrap();
    assert_eq!(vendor_ids(&listing), vec![1]);
    assert_eq!(listing.page.items[0].tier.tier, None);
    assert!(!listing.page.items[0].tier.featured);
}

#[tokio::test]
async fn test_duplicate_active_subscriptions_resolve_deterministically() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscriptions
        .insert(subscription_row(1, 1, Tier::EliteYearly, 5, true, year_end()));
    fx.subscriptions.insert(subscription_row(
        2,
        1,
        Tier::BasicMonthly,
        0,
        false,
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    ));
    fx.societies.insert(society_row(1, "Pune", Some(PUNE)));

    let listing = fx
        .service()
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();
    assert_eq!(listing.tier.tier, Some(Tier::BasicMonthly));
    assert!(listing.page.items.is_empty());
}

#[tokio::test]
async fn test_unlocated_provider_lists_same_city_societies_with_note() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Pune", None));
    fx.societies.insert(society_row(1, "PUNE", Some(PUNE)));
    fx.societies.insert(society_row(2, "Mumbai", Some(MUMBAI)));

    let listing = fx
        .service()
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();

    let ids: Vec<i64> = listing.page.items.iter().map(|s| s.society.id.0).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(listing.note, Some(CITY_FALLBACK_NOTE));
    assert_eq!(listing.search_radius, ServiceRadius::DEFAULT);
}

#[tokio::test]
async fn test_societies_sorted_closest_first_unknown_last() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscribe(1, 1, Tier::EliteYearly);
    fx.societies.insert(society_row(1, "Mumbai", None));
    fx.societies.insert(society_row(2, "Pune", Some(PUNE)));
    fx.societies.insert(society_row(3, "Mumbai", Some(NEAR_MUMBAI)));

    let listing = fx
        .service()
        .nearby_societies(ProviderId(1), &SocietyQuery::default())
        .await
        .unwrap();

    let ids: Vec<i64> = listing.page.items.iter().map(|s| s.society.id.0).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(listing.search_radius, ServiceRadius::Unlimited);
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let fx = Fixture::new();
    let service = fx.service();

    let err = service
        .nearby_vendors(SocietyId(404), &VendorQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::SocietyNotFound));
    assert!(err.is_not_found());

    let err = service
        .nearby_societies(ProviderId(404), &SocietyQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::ProviderNotFound));

    fx.providers.insert(provider_row(1, "Mumbai", None));
    let err = service.check_booking(ProviderId(1), SocietyId(404)).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::SocietyNotFound));
}

#[tokio::test]
async fn test_booking_rejected_outside_radius() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.subscribe(1, 1, Tier::BasicMonthly);
    fx.societies.insert(society_row(2, "Pune", Some(PUNE)));

    let err = fx
        .service()
        .check_booking(ProviderId(1), SocietyId(2))
        .await
        .unwrap_err();

    let DiscoveryError::Ineligible(rejection) = err else {
        panic!("expected an out-of-area rejection");
    };
    assert_eq!(rejection.reason, RejectionReason::OutOfRadius);
    assert_eq!(rejection.max_radius, ServiceRadius::Limited(10));
    assert!(rejection.distance_km.is_some_and(|d| d > 100.0));
}

#[tokio::test]
async fn test_booking_accepted_within_radius() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", Some(MUMBAI)));
    fx.societies.insert(society_row(1, "Mumbai", Some(NEAR_MUMBAI)));

    let check = fx.service().check_booking(ProviderId(1), SocietyId(1)).await.unwrap();
    assert!(matches!(check.eligibility, Eligibility::WithinRadius { .. }));
    assert_eq!(check.provider.id, ProviderId(1));
    assert_eq!(check.society.id, SocietyId(1));
}

#[tokio::test]
async fn test_booking_city_fallback_is_tier_gated_by_default() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Mumbai", None));
    fx.subscribe(1, 1, Tier::BasicYearly);
    fx.providers.insert(provider_row(2, "Mumbai", None));
    fx.subscribe(2, 2, Tier::PremiumMonthly);
    fx.societies.insert(society_row(1, "Pune", None));
    let service = fx.service();

    let err = service.check_booking(ProviderId(1), SocietyId(1)).await.unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Ineligible(ref r) if r.reason == RejectionReason::OutsideCity
    ));

    let check = service.check_booking(ProviderId(2), SocietyId(1)).await.unwrap();
    assert_eq!(check.eligibility, Eligibility::TierWaiver);

    let lenient = fx.service_with(DiscoveryConfig::new().with_booking_fallback(CityFallback::Skip));
    let check = lenient.check_booking(ProviderId(1), SocietyId(1)).await.unwrap();
    assert_eq!(check.eligibility, Eligibility::Unchecked);
}

#[tokio::test]
async fn test_list_providers_measures_from_requester() {
    let fx = Fixture::new();
    fx.providers.insert(provider_row(1, "Pune", Some(PUNE)));
    fx.providers.insert(provider_row(2, "Mumbai", None));
    fx.providers.insert(provider_row(3, "Navi Mumbai", Some(NEAR_MUMBAI)));
    let mut unverified = provider_row(4, "Mumbai", Some(MUMBAI));
    unverified.verification_status = "PENDING".to_string();
    fx.providers.insert(unverified);
    let service = fx.service();

    let query = ProviderQuery {
        requester: Some(Coordinate::new(MUMBAI.0, MUMBAI.1)),
        sort_by: SortMode::Distance,
        ..ProviderQuery::default()
    };
    let listing = service.list_providers(&query).await.unwrap();
    let ids: Vec<i64> = listing.page.items.iter().map(|v| v.provider.id.0).collect();
    assert_eq!(ids, vec![4, 3, 1, 2]);
    assert_eq!(listing.page.items[0].distance_km, Some(0.0));

    let query = ProviderQuery {
        verified_only: true,
        city: Some("mumbai".to_string()),
        ..ProviderQuery::default()
    };
    let listing = service.list_providers(&query).await.unwrap();
    let ids: Vec<i64> = listing.page.items.iter().map(|v| v.provider.id.0).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(listing.page.items.iter().all(|v| v.distance_km.is_none()));
}
