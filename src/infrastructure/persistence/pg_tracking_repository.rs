//! PostgreSQL implementation of upgrade click tracking.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::TrackingRepository;
use crate::domain::upgrade_event::UpgradeClickEvent;
use crate::error::AppError;

/// Writes upgrade clicks into `upgrade_clicks`.
pub struct PgTrackingRepository {
    pool: Arc<PgPool>,
}

impl PgTrackingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackingRepository for PgTrackingRepository {
    async fn record_upgrade_click(&self, event: &UpgradeClickEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO upgrade_clicks (user_id, country_code, billing_period, clicked_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.user_id)
        .bind(&event.country_code)
        .bind(event.period.as_str())
        .bind(event.clicked_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_upgrade_clicks(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM upgrade_clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
