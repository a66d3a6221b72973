//! Candidate ranking
//!
//! Each candidate carries a small immutable [`RankKey`]; ordering is a fixed
//! multi-key comparison selected by [`SortMode`]. All modes end with an
//! ascending ID tie-break so repeated calls paginate identically.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Caller-selectable ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Featured, priority weight, distance, rating, review count
    #[default]
    Priority,
    /// Closest first, unknown distance last
    Distance,
    /// Highest rating, then most reviews
    Rating,
}

impl SortMode {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Distance => "distance",
            Self::Rating => "rating",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "distance" => Ok(Self::Distance),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("invalid sort_by: {s} (expected priority, distance or rating)")),
        }
    }
}

/// Values a candidate is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RankKey {
    /// Stable identifier, last-resort tie-break
    pub id: i64,
    pub featured: bool,
    pub priority_ranking: i32,
    /// `None` sorts after every known distance
    pub distance_km: Option<f64>,
    pub rating_average: f64,
    pub rating_count: i64,
}

/// An item paired with its ranking key
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub item: T,
    pub key: RankKey,
}

impl<T> Candidate<T> {
    /// Pair an item with its key
    pub fn new(item: T, key: RankKey) -> Self {
        Self { item, key }
    }
}

/// Known distances ascending, unknown last
fn cmp_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_rating(a: &RankKey, b: &RankKey) -> Ordering {
    b.rating_average
        .total_cmp(&a.rating_average)
        .then_with(|| b.rating_count.cmp(&a.rating_count))
}

/// Compare two keys under `mode`. `Less` means `a` ranks first.
pub fn compare(a: &RankKey, b: &RankKey, mode: SortMode) -> Ordering {
    let primary = match mode {
        SortMode::Priority => b
            .featured
            .cmp(&a.featured)
            .then_with(|| b.priority_ranking.cmp(&a.priority_ranking))
            .then_with(|| cmp_distance(a.distance_km, b.distance_km))
            .then_with(|| cmp_rating(a, b)),
        SortMode::Distance => cmp_distance(a.distance_km, b.distance_km),
        SortMode::Rating => cmp_rating(a, b),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Order candidates under `mode`
pub fn rank<T>(mut candidates: Vec<Candidate<T>>, mode: SortMode) -> Vec<Candidate<T>> {
    candidates.sort_by(|a, b| compare(&a.key, &b.key, mode));
    candidates
}
