//! PostgreSQL repository implementations

mod booking;
mod provider;
mod society;
mod subscription;

pub use booking::PgBookingRepository;
pub use provider::PgProviderRepository;
pub use society::PgSocietyRepository;
pub use subscription::PgSubscriptionRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub providers: PgProviderRepository,
    pub societies: PgSocietyRepository,
    pub subscriptions: PgSubscriptionRepository,
    pub bookings: PgBookingRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            providers: PgProviderRepository::new(pool.clone()),
            societies: PgSocietyRepository::new(pool.clone()),
            subscriptions: PgSubscriptionRepository::new(pool.clone()),
            bookings: PgBookingRepository::new(pool),
        }
    }
}
