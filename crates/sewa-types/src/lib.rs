//! Sewa Types - Shared domain types
//!
//! This crate contains domain types used across the discovery services:
//! - Providers (vendors) and housing societies
//! - Geographic coordinates
//! - Subscription tiers, plans and service radii

pub mod error;
pub mod geo;
pub mod provider;
pub mod society;
pub mod subscription;
pub mod tier;

pub use error::*;
pub use geo::*;
pub use provider::*;
pub use society::*;
pub use subscription::*;
pub use tier::*;
