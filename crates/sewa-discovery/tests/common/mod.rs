//! Common test utilities for sewa-discovery integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{
    provider_row, society_row, subscription_row, MockProviderRepository, MockSocietyRepository,
    MockSubscriptionRepository,
};
