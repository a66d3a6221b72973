//! Subscription resolution
//!
//! Turns a batch of stored subscriptions into per-provider tier metadata.
//! The batch is fetched once per request; lookups are in memory.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use sewa_types::{ProviderId, ServiceRadius, Subscription, Tier};

/// Tier metadata for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedTier {
    /// Current paid tier, if any
    pub tier: Option<Tier>,
    /// Radius the tier buys
    pub max_radius: ServiceRadius,
    /// Paid placement weight
    pub priority_ranking: i32,
    /// Pinned to the top of listings
    pub featured: bool,
}

impl ResolvedTier {
    /// Metadata for a provider with no current paid subscription
    pub const UNSUBSCRIBED: ResolvedTier = ResolvedTier {
        tier: None,
        max_radius: ServiceRadius::DEFAULT,
        priority_ranking: 0,
        featured: false,
    };

    /// Metadata granted by a subscription
    pub fn from_subscription(sub: &Subscription) -> Self {
        Self {
            tier: Some(sub.plan.tier),
            max_radius: sub.plan.tier.service_radius(),
            priority_ranking: sub.plan.priority_ranking,
            featured: sub.plan.featured_listing,
        }
    }

    /// A positive priority weight marks the provider as sponsored
    pub fn is_sponsored(&self) -> bool {
        self.priority_ranking > 0
    }

    /// Whether the provider may serve a city other than its own
    pub fn serves_other_cities(&self) -> bool {
        self.tier.is_some_and(|tier| tier.serves_other_cities())
    }
}

impl Default for ResolvedTier {
    fn default() -> Self {
        Self::UNSUBSCRIBED
    }
}

/// Resolves providers to their current subscription tier
#[derive(Debug, Clone)]
pub struct SubscriptionResolver {
    today: NaiveDate,
    by_provider: HashMap<ProviderId, Vec<Subscription>>,
}

impl SubscriptionResolver {
    /// Index a batch of subscriptions. Entries not current on `today` are ignored.
    pub fn new(subscriptions: impl IntoIterator<Item = Subscription>, today: NaiveDate) -> Self {
        let mut by_provider: HashMap<ProviderId, Vec<Subscription>> = HashMap::new();
        for sub in subscriptions {
            if sub.is_current(today) {
                by_provider.entry(sub.provider_id).or_default().push(sub);
            }
        }
        Self { today, by_provider }
    }

    /// Date the resolver evaluates subscriptions against
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve a provider's tier metadata
    pub fn resolve(&self, provider_id: ProviderId) -> ResolvedTier {
        self.by_provider
            .get(&provider_id)
            .and_then(|subs| select_current(provider_id, subs))
            .map_or(ResolvedTier::UNSUBSCRIBED, ResolvedTier::from_subscription)
    }
}

/// Pick the subscription in force among `subs`.
///
/// At most one should exist. When storage holds more, the one ending last
/// wins, then the highest subscription ID.
pub fn select_current(provider_id: ProviderId, subs: &[Subscription]) -> Option<&Subscription> {
    if subs.len() > 1 {
        tracing::warn!(
            provider_id = %provider_id,
            count = subs.len(),
            subscription_ids = ?subs.iter().map(|s| s.id.0).collect::<Vec<_>>(),
            "Data integrity: provider has more than one active subscription"
        );
    }

    subs.iter().max_by_key(|sub| (sub.end_date, sub.id))
}
