//! Discovery service - ties together storage, tier resolution, eligibility and ranking

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use sewa_db::{ProviderFilter, ProviderRepository, SocietyRepository, SubscriptionRepository};
use sewa_types::{
    Coordinate, Provider, ProviderId, ProviderType, ServiceRadius, Society, SocietyId, Subscription,
};

use crate::{
    booking::BookingEligibilityGate,
    config::{DiscoveryConfig, DEFAULT_PAGE_LIMIT},
    eligibility::{Eligibility, EligibilityFilter},
    geo,
    pagination::{paginate, Page},
    ranking::{rank, Candidate, RankKey, SortMode},
    resolver::{ResolvedTier, SubscriptionResolver},
    DiscoveryError,
};

/// Shown when a provider without a location lists societies
pub const CITY_FALLBACK_NOTE: &str = "Provider location not set - showing societies in same city";

// =============================================================================
// Queries
// =============================================================================

/// Vendors near a society
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorQuery {
    pub skip: usize,
    pub limit: usize,
    /// Combined with each provider's tier radius per [`RadiusOverride`](crate::RadiusOverride)
    pub radius_km: Option<u32>,
    pub provider_type: Option<ProviderType>,
    pub sort_by: SortMode,
}

impl Default for VendorQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            radius_km: None,
            provider_type: None,
            sort_by: SortMode::Priority,
        }
    }
}

/// Societies near a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocietyQuery {
    pub skip: usize,
    pub limit: usize,
    /// Combined with the provider's tier radius per [`RadiusOverride`](crate::RadiusOverride)
    pub radius_km: Option<u32>,
}

impl Default for SocietyQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            radius_km: None,
        }
    }
}

/// General provider listing. No eligibility filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderQuery {
    /// Distances are measured from here when set
    pub requester: Option<Coordinate>,
    pub verified_only: bool,
    pub provider_type: Option<ProviderType>,
    /// Case-insensitive substring of the provider's city
    pub city: Option<String>,
    pub sort_by: SortMode,
    pub skip: usize,
    pub limit: usize,
}

impl Default for ProviderQuery {
    fn default() -> Self {
        Self {
            requester: None,
            verified_only: false,
            provider_type: None,
            city: None,
            sort_by: SortMode::Priority,
            skip: 0,
            limit: 100,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// A provider annotated with its tier and distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorEntry {
    pub provider: Provider,
    pub tier: ResolvedTier,
    /// Rounded to two decimals; `None` when unknown
    pub distance_km: Option<f64>,
}

/// Vendors eligible for a society, ranked and paged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorListing {
    pub page: Page<VendorEntry>,
    pub society: Society,
    pub sort_by: SortMode,
}

/// A society annotated with its distance from the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocietyEntry {
    pub society: Society,
    pub distance_km: Option<f64>,
}

/// Societies a provider may serve, closest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocietyListing {
    pub page: Page<SocietyEntry>,
    pub provider_id: ProviderId,
    pub tier: ResolvedTier,
    /// Radius actually applied after any caller override
    pub search_radius: ServiceRadius,
    /// Set when the provider has no location and cities were compared instead
    pub note: Option<&'static str>,
}

impl SocietyListing {
    /// Radius the provider's tier allows
    pub fn max_radius(&self) -> ServiceRadius {
        self.tier.max_radius
    }
}

/// General provider listing result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderListing {
    pub page: Page<VendorEntry>,
    pub sort_by: SortMode,
}

/// An accepted booking pair
#[derive(Debug, Clone, PartialEq)]
pub struct BookingCheck {
    pub provider: Provider,
    pub society: Society,
    pub tier: ResolvedTier,
    pub eligibility: Eligibility,
}

// =============================================================================
// Service
// =============================================================================

/// Discovery service
///
/// Every call loads its full candidate set, fetches current subscriptions in
/// one batch, filters, ranks and pages in memory.
pub struct DiscoveryService<P, S, B>
where
    P: ProviderRepository,
    S: SocietyRepository,
    B: SubscriptionRepository,
{
    providers: Arc<P>,
    societies: Arc<S>,
    subscriptions: Arc<B>,
    config: DiscoveryConfig,
    listing_filter: EligibilityFilter,
    booking_gate: BookingEligibilityGate,
    fixed_today: Option<NaiveDate>,
}

impl<P, S, B> DiscoveryService<P, S, B>
where
    P: ProviderRepository,
    S: SocietyRepository,
    B: SubscriptionRepository,
{
    /// Create a new discovery service
    pub fn new(providers: Arc<P>, societies: Arc<S>, subscriptions: Arc<B>, config: DiscoveryConfig) -> Self {
        Self {
            providers,
            societies,
            subscriptions,
            listing_filter: EligibilityFilter::new(config.listing_fallback),
            booking_gate: BookingEligibilityGate::new(config.booking_fallback),
            config,
            fixed_today: None,
        }
    }

    /// Evaluate subscriptions against a fixed date instead of the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Service configuration
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Load a provider
    pub async fn provider(&self, id: ProviderId) -> Result<Provider, DiscoveryError> {
        let row = self
            .providers
            .find_by_id(id)
            .await?
            .ok_or(DiscoveryError::ProviderNotFound)?;

        // An unreadable provider row is as good as missing
        Provider::try_from(row).map_err(|e| {
            tracing::warn!(provider_id = %id, error = %e, "Unreadable provider row");
            DiscoveryError::ProviderNotFound
        })
    }

    /// Load a society
    pub async fn society(&self, id: SocietyId) -> Result<Society, DiscoveryError> {
        self.societies
            .find_by_id(id)
            .await?
            .map(Society::from)
            .ok_or(DiscoveryError::SocietyNotFound)
    }

    async fn load_providers(&self, filter: &ProviderFilter) -> Result<Vec<Provider>, DiscoveryError> {
        let rows = self.providers.list(filter).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                Provider::try_from(row)
                    .map_err(|e| {
                        tracing::warn!(provider_id = id, error = %e, "Skipping unreadable provider row");
                    })
                    .ok()
            })
            .collect())
    }

    async fn resolver_for(&self, provider_ids: &[ProviderId]) -> Result<SubscriptionResolver, DiscoveryError> {
        let today = self.today();
        let rows = self
            .subscriptions
            .find_current_for_providers(provider_ids, today)
            .await?;

        let subscriptions = rows.into_iter().filter_map(|row| {
            let id = row.id;
            Subscription::try_from(row)
                .map_err(|e| {
                    tracing::warn!(subscription_id = id, error = %e, "Skipping subscription with unreadable plan");
                })
                .ok()
        });

        Ok(SubscriptionResolver::new(subscriptions, today))
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Vendors a society may see, ranked by `query.sort_by`
    pub async fn nearby_vendors(
        &self,
        society_id: SocietyId,
        query: &VendorQuery,
    ) -> Result<VendorListing, DiscoveryError> {
        let society = self.society(society_id).await?;

        let filter = ProviderFilter::listed().with_provider_type(query.provider_type);
        let providers = self.load_providers(&filter).await?;
        let ids: Vec<ProviderId> = providers.iter().map(|p| p.id).collect();
        let resolver = self.resolver_for(&ids).await?;

        let scanned = providers.len();
        let candidates: Vec<Candidate<VendorEntry>> = providers
            .into_iter()
            .filter_map(|provider| {
                let tier = resolver.resolve(provider.id);
                let radius = self
                    .config
                    .vendor_radius_override
                    .apply(tier.max_radius, query.radius_km);
                let verdict = self
                    .listing_filter
                    .evaluate_within(&provider, &tier, &society, radius);
                verdict
                    .is_eligible()
                    .then(|| vendor_candidate(provider, tier, verdict.distance_km()))
            })
            .collect();

        tracing::debug!(
            society_id = %society_id,
            scanned,
            eligible = candidates.len(),
            sort_by = %query.sort_by,
            "Ranked nearby vendors"
        );

        let ranked = rank(candidates, query.sort_by);
        let page = paginate(ranked, query.skip, self.config.clamp_limit(query.limit)).map(|c| c.item);

        Ok(VendorListing {
            page,
            society,
            sort_by: query.sort_by,
        })
    }

    /// Societies a provider may serve, closest first
    pub async fn nearby_societies(
        &self,
        provider_id: ProviderId,
        query: &SocietyQuery,
    ) -> Result<SocietyListing, DiscoveryError> {
        let provider = self.provider(provider_id).await?;
        let tier = self.resolver_for(&[provider_id]).await?.resolve(provider_id);
        let search_radius = self
            .config
            .society_radius_override
            .apply(tier.max_radius, query.radius_km);

        let societies = self.societies.list_listed().await?;
        let candidates: Vec<Candidate<SocietyEntry>> = societies
            .into_iter()
            .map(Society::from)
            .filter_map(|society| {
                let verdict = self
                    .listing_filter
                    .evaluate_within(&provider, &tier, &society, search_radius);
                if !verdict.is_eligible() {
                    return None;
                }
                let distance_km = verdict.distance_km();
                let key = RankKey {
                    id: society.id.0,
                    distance_km,
                    ..RankKey::default()
                };
                Some(Candidate::new(
                    SocietyEntry {
                        society,
                        distance_km: distance_km.map(geo::round_km),
                    },
                    key,
                ))
            })
            .collect();

        tracing::debug!(
            provider_id = %provider_id,
            search_radius = %search_radius,
            eligible = candidates.len(),
            "Ranked nearby societies"
        );

        let ranked = rank(candidates, SortMode::Distance);
        let page = paginate(ranked, query.skip, self.config.clamp_limit(query.limit)).map(|c| c.item);

        Ok(SocietyListing {
            page,
            provider_id,
            tier,
            search_radius,
            note: provider.coordinate.is_none().then_some(CITY_FALLBACK_NOTE),
        })
    }

    /// All active providers, annotated and ranked. No eligibility filtering.
    pub async fn list_providers(&self, query: &ProviderQuery) -> Result<ProviderListing, DiscoveryError> {
        let filter = ProviderFilter {
            active_only: true,
            verified_only: query.verified_only,
            provider_type: query.provider_type,
            city_contains: query.city.clone(),
        };
        let providers = self.load_providers(&filter).await?;
        let ids: Vec<ProviderId> = providers.iter().map(|p| p.id).collect();
        let resolver = self.resolver_for(&ids).await?;

        let candidates: Vec<Candidate<VendorEntry>> = providers
            .into_iter()
            .map(|provider| {
                let tier = resolver.resolve(provider.id);
                let distance_km = geo::distance_km(query.requester, provider.coordinate);
                vendor_candidate(provider, tier, distance_km)
            })
            .collect();

        let ranked = rank(candidates, query.sort_by);
        let page = paginate(ranked, query.skip, self.config.clamp_limit(query.limit)).map(|c| c.item);

        Ok(ProviderListing {
            page,
            sort_by: query.sort_by,
        })
    }

    // =========================================================================
    // Booking
    // =========================================================================

    /// Decide whether `provider_id` may be booked by `society_id`
    pub async fn check_booking(
        &self,
        provider_id: ProviderId,
        society_id: SocietyId,
    ) -> Result<BookingCheck, DiscoveryError> {
        let provider = self.provider(provider_id).await?;
        let society = self.society(society_id).await?;
        let tier = self.resolver_for(&[provider_id]).await?.resolve(provider_id);

        match self.booking_gate.check_booking_allowed(&provider, &tier, &society) {
            Ok(eligibility) => Ok(BookingCheck {
                provider,
                society,
                tier,
                eligibility,
            }),
            Err(rejection) => {
                tracing::info!(
                    provider_id = %provider_id,
                    society_id = %society_id,
                    reason = rejection.reason.as_str(),
                    max_radius = %rejection.max_radius,
                    distance_km = ?rejection.distance_km,
                    "Booking rejected: society outside service area"
                );
                Err(rejection.into())
            }
        }
    }
}

fn vendor_candidate(provider: Provider, tier: ResolvedTier, distance_km: Option<f64>) -> Candidate<VendorEntry> {
    let key = RankKey {
        id: provider.id.0,
        featured: tier.featured,
        priority_ranking: tier.priority_ranking,
        distance_km,
        rating_average: provider.rating_average,
        rating_count: provider.rating_count,
    };
    Candidate::new(
        VendorEntry {
            provider,
            tier,
            distance_km: distance_km.map(geo::round_km),
        },
        key,
    )
}

impl<P, S, B> std::fmt::Debug for DiscoveryService<P, S, B>
where
    P: ProviderRepository,
    S: SocietyRepository,
    B: SubscriptionRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("config", &self.config)
            .field("fixed_today", &self.fixed_today)
            .finish()
    }
}
