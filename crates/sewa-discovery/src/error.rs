//! Discovery errors

use thiserror::Error;

use crate::booking::Rejection;

/// Discovery errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Society not found
    #[error("society not found")]
    SocietyNotFound,

    /// Provider not found
    #[error("provider not found")]
    ProviderNotFound,

    /// Provider may not serve the society
    #[error("{0}")]
    Ineligible(Rejection),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sewa_db::DbError),
}

impl DiscoveryError {
    /// Whether the error refers to a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SocietyNotFound | Self::ProviderNotFound)
    }
}

impl From<Rejection> for DiscoveryError {
    fn from(rejection: Rejection) -> Self {
        Self::Ineligible(rejection)
    }
}
