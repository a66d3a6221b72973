//! Common error types

use thiserror::Error;

/// Errors raised while interpreting stored values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SewaError {
    /// Invalid tier
    #[error("invalid tier: {0}")]
    InvalidTier(String),

    /// Invalid subscription status
    #[error("invalid subscription status: {0}")]
    InvalidStatus(String),

    /// Invalid provider type
    #[error("invalid provider type: {0}")]
    InvalidProviderType(String),

    /// Invalid verification status
    #[error("invalid verification status: {0}")]
    InvalidVerificationStatus(String),
}

impl From<crate::TierParseError> for SewaError {
    fn from(err: crate::TierParseError) -> Self {
        Self::InvalidTier(err.0)
    }
}
