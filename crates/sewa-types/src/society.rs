//! Housing society types

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Unique society identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocietyId(pub i64);

impl std::fmt::Display for SocietyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Housing society
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Society {
    /// Society ID
    pub id: SocietyId,
    /// Registered name
    pub name: String,
    /// City
    pub city: String,
    /// Location, if geocoded
    pub coordinate: Option<Coordinate>,
    pub address: Option<String>,
    pub registration_number: Option<String>,
    pub total_members: Option<i32>,
}
