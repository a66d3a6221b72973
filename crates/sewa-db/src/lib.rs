//! Sewa DB - Database abstractions
//!
//! SQLx-based storage layer for the discovery services. The discovery core
//! only reads providers, societies and subscriptions; bookings are the one
//! write, issued after the eligibility gate passes.
//!
//! # Example
//!
//! ```rust,ignore
//! use sewa_db::{create_pool, ProviderFilter, ProviderRepository, Repositories};
//!
//! let pool = create_pool("postgres://localhost/sewa").await?;
//! let repos = Repositories::new(pool);
//!
//! let providers = repos.providers.list(&ProviderFilter::listed()).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
