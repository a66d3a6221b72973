//! Service provider (vendor) types

use serde::{Deserialize, Serialize};

use crate::{Coordinate, SewaError};

/// Unique provider identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub i64);

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Line of business a provider offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Lawyers, legal advisors
    Legal,
    /// Engineers, structural auditors
    Technical,
    /// Auditors, accountants
    Financial,
    /// Society management services
    Administrative,
}

impl ProviderType {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Technical => "technical",
            Self::Financial => "financial",
            Self::Administrative => "administrative",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = SewaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legal" => Ok(Self::Legal),
            "technical" => Ok(Self::Technical),
            "financial" => Ok(Self::Financial),
            "administrative" => Ok(Self::Administrative),
            _ => Err(SewaError::InvalidProviderType(s.to_string())),
        }
    }
}

/// Admin review state of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
    Suspended,
}

impl VerificationStatus {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = SewaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            "suspended" => Ok(Self::Suspended),
            _ => Err(SewaError::InvalidVerificationStatus(s.to_string())),
        }
    }
}

/// Service provider as seen by discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider ID
    pub id: ProviderId,
    /// Business name
    pub business_name: String,
    /// Line of business
    pub provider_type: ProviderType,
    /// Home city
    pub city: String,
    /// Business location, if geocoded
    pub coordinate: Option<Coordinate>,
    /// Additional cities the provider claims to serve
    pub service_areas: Vec<String>,
    /// Average review score, 0 to 5
    pub rating_average: f64,
    /// Number of reviews
    pub rating_count: i64,
    /// Whether the provider is active
    pub is_active: bool,
    /// Admin review state
    pub verification_status: VerificationStatus,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub years_experience: Option<i32>,
}

impl Provider {
    /// Whether an admin verified the provider
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }

    /// Whether `city` is one of the declared service areas (case-insensitive)
    pub fn serves_area(&self, city: &str) -> bool {
        !city.is_empty()
            && self
                .service_areas
                .iter()
                .any(|area| area.to_lowercase() == city.to_lowercase())
    }
}
