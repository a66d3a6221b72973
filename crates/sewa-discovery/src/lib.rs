//! Sewa Discovery - vendor discovery and subscription-tier ranking
//!
//! Given a society or a vendor, finds the counterparts it may deal with and
//! orders them by paid placement, distance and review signals.
//!
//! Pipeline per request: load candidates, resolve tiers from one batched
//! subscription read, filter by eligibility, rank, paginate. The booking
//! gate reuses the same eligibility rules and rejects instead of filtering.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sewa_db::Repositories;
//! use sewa_discovery::{DiscoveryConfig, DiscoveryService, VendorQuery};
//! use sewa_types::SocietyId;
//!
//! let repos = Repositories::new(pool);
//! let discovery = DiscoveryService::new(
//!     Arc::new(repos.providers),
//!     Arc::new(repos.societies),
//!     Arc::new(repos.subscriptions),
//!     DiscoveryConfig::default(),
//! );
//!
//! let listing = discovery.nearby_vendors(SocietyId(12), &VendorQuery::default()).await?;
//! ```

pub mod booking;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod geo;
pub mod pagination;
pub mod ranking;
pub mod resolver;
pub mod service;

pub use booking::{new_booking_number, BookingEligibilityGate, Rejection, RejectionReason};
pub use config::{DiscoveryConfig, RadiusOverride, DEFAULT_PAGE_LIMIT};
pub use eligibility::{CityFallback, Eligibility, EligibilityFilter, Located};
pub use error::DiscoveryError;
pub use pagination::{paginate, Page, MAX_PAGE_LIMIT};
pub use ranking::{rank, Candidate, RankKey, SortMode};
pub use resolver::{ResolvedTier, SubscriptionResolver};
pub use service::{
    BookingCheck, DiscoveryService, ProviderListing, ProviderQuery, SocietyEntry, SocietyListing,
    SocietyQuery, VendorEntry, VendorListing, VendorQuery, CITY_FALLBACK_NOTE,
};
