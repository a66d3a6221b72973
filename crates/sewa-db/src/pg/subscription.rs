//! PostgreSQL subscription repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use sewa_types::ProviderId;

use crate::error::DbResult;
use crate::models::CurrentSubscriptionRow;
use crate::repo::SubscriptionRepository;

/// PostgreSQL subscription repository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new subscription repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_current_for_providers(
        &self,
        provider_ids: &[ProviderId],
        today: NaiveDate,
    ) -> DbResult<Vec<CurrentSubscriptionRow>> {
        if provider_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = provider_ids.iter().map(|id| id.0).collect();

        let subs = sqlx::query_as::<_, CurrentSubscriptionRow>(
            r#"
            SELECT s.id::int8 AS id, s.service_provider_id::int8 AS provider_id,
                   s.status::text AS status, s.start_date, s.end_date,
                   p.id::int8 AS plan_id, p.tier::text AS tier, p.name AS plan_name,
                   p.priority_ranking, p.featured_listing
            FROM vendor_subscriptions s
            JOIN vendor_subscription_plans p ON p.id = s.plan_id
            WHERE s.service_provider_id = ANY($1)
              AND UPPER(s.status::text) = 'ACTIVE'
              AND s.end_date >= $2
            ORDER BY s.service_provider_id, s.end_date DESC, s.id DESC
            "#,
        )
        .bind(&ids)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(subs)
    }
}
