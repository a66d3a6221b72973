//! PostgreSQL society repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use sewa_types::SocietyId;

use crate::error::DbResult;
use crate::models::SocietyRow;
use crate::repo::SocietyRepository;

/// PostgreSQL society repository
#[derive(Clone)]
pub struct PgSocietyRepository {
    pool: PgPool,
}

impl PgSocietyRepository {
    /// Create a new society repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocietyRepository for PgSocietyRepository {
    async fn find_by_id(&self, id: SocietyId) -> DbResult<Option<SocietyRow>> {
        let society = sqlx::query_as::<_, SocietyRow>(
            r#"
            SELECT id::int8 AS id, name, city, address, registration_number, total_members,
                   latitude::float8 AS latitude, longitude::float8 AS longitude
            FROM societies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(society)
    }

    async fn list_listed(&self) -> DbResult<Vec<SocietyRow>> {
        let societies = sqlx::query_as::<_, SocietyRow>(
            r#"
            SELECT id::int8 AS id, name, city, address, registration_number, total_members,
                   latitude::float8 AS latitude, longitude::float8 AS longitude
            FROM societies
            WHERE is_verified = true AND COALESCE(is_active, true)
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(societies)
    }
}
