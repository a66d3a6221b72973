//! Subscription types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ProviderId, Tier};

/// Unique subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub i64);

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Created, invoice not yet paid
    PendingPayment,
    /// Paid and in force
    Active,
    /// Ran past its end date
    Expired,
    /// Cancelled by the vendor or an admin
    Cancelled,
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = crate::SewaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_payment" => Ok(Self::PendingPayment),
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(crate::SewaError::InvalidStatus(s.to_string())),
        }
    }
}

/// A plan from the vendor subscription catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// Plan ID
    pub id: i64,
    /// Tier this plan sells
    pub tier: Tier,
    /// Display name
    pub name: String,
    /// Paid placement weight, higher ranks first
    pub priority_ranking: i32,
    /// Whether listings are pinned to the top
    pub featured_listing: bool,
}

/// A vendor's subscription to a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: SubscriptionId,
    /// Subscribed provider
    pub provider_id: ProviderId,
    /// Plan the subscription references
    pub plan: SubscriptionPlan,
    /// Subscription status
    pub status: SubscriptionStatus,
    /// First day covered
    pub start_date: NaiveDate,
    /// Last day covered (inclusive)
    pub end_date: NaiveDate,
}

impl Subscription {
    /// Whether the subscription is in force on `today`
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.status == SubscriptionStatus::Active && self.end_date >= today
    }
}
