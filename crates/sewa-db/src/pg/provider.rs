//! PostgreSQL provider repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use sewa_types::ProviderId;

use crate::error::DbResult;
use crate::models::ProviderRow;
use crate::repo::{ProviderFilter, ProviderRepository};

/// PostgreSQL provider repository
#[derive(Clone)]
pub struct PgProviderRepository {
    pool: PgPool,
}

impl PgProviderRepository {
    /// Create a new provider repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderRepository for PgProviderRepository {
    async fn find_by_id(&self, id: ProviderId) -> DbResult<Option<ProviderRow>> {
        let provider = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id::int8 AS id, business_name, provider_type::text AS provider_type,
                   description, city, address, phone, email, website,
                   latitude::float8 AS latitude, longitude::float8 AS longitude,
                   service_areas, verification_status::text AS verification_status,
                   years_experience, average_rating::float8 AS average_rating,
                   total_reviews::int8 AS total_reviews, is_active
            FROM service_providers
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(provider)
    }

    async fn list(&self, filter: &ProviderFilter) -> DbResult<Vec<ProviderRow>> {
        let providers = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id::int8 AS id, business_name, provider_type::text AS provider_type,
                   description, city, address, phone, email, website,
                   latitude::float8 AS latitude, longitude::float8 AS longitude,
                   service_areas, verification_status::text AS verification_status,
                   years_experience, average_rating::float8 AS average_rating,
                   total_reviews::int8 AS total_reviews, is_active
            FROM service_providers
            WHERE ($1 = false OR COALESCE(is_active, true))
              AND ($2 = false OR UPPER(verification_status::text) = 'VERIFIED')
              AND ($3::text IS NULL OR UPPER(provider_type::text) = UPPER($3))
              AND ($4::text IS NULL OR city ILIKE '%' || $4 || '%')
            ORDER BY id
            "#,
        )
        .bind(filter.active_only)
        .bind(filter.verified_only)
        .bind(filter.provider_type.map(|t| t.as_str()))
        .bind(filter.city_contains.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(providers)
    }
}
