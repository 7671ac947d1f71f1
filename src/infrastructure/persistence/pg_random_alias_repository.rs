//! PostgreSQL implementation of random alias repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AliasPatch, NewRandomAlias, RandomAlias};
use crate::domain::repositories::RandomAliasRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for random aliases (`relay_addresses`).
///
/// Addresses are globally unique; a collision on insert surfaces as
/// [`AppError::Conflict`] so the caller can retry with a new address.
pub struct PgRandomAliasRepository {
    pool: Arc<PgPool>,
}

impl PgRandomAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RandomAliasRow {
    id: i64,
    user_id: i64,
    address: String,
    description: String,
    enabled: bool,
    block_list_emails: bool,
    num_blocked: i64,
    num_forwarded: i64,
    num_replied: i64,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl From<RandomAliasRow> for RandomAlias {
    fn from(row: RandomAliasRow) -> Self {
        RandomAlias {
            id: row.id,
            user_id: row.user_id,
            address: row.address,
            description: row.description,
            enabled: row.enabled,
            block_list_emails: row.block_list_emails,
            num_blocked: row.num_blocked,
            num_forwarded: row.num_forwarded,
            num_replied: row.num_replied,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
        }
    }
}

const ALIAS_COLUMNS: &str = "id, user_id, address, description, enabled, block_list_emails, \
     num_blocked, num_forwarded, num_replied, created_at, last_used_at";

#[async_trait]
impl RandomAliasRepository for PgRandomAliasRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RandomAlias>, AppError> {
        let rows = sqlx::query_as::<_, RandomAliasRow>(&format!(
            "SELECT {ALIAS_COLUMNS} FROM relay_addresses WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(RandomAlias::from).collect())
    }

    async fn create(&self, new_alias: NewRandomAlias) -> Result<RandomAlias, AppError> {
        let row = sqlx::query_as::<_, RandomAliasRow>(&format!(
            "INSERT INTO relay_addresses (user_id, address, description) VALUES ($1, $2, $3) RETURNING {ALIAS_COLUMNS}"
        ))
        .bind(new_alias.user_id)
        .bind(&new_alias.address)
        .bind(&new_alias.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        patch: AliasPatch,
    ) -> Result<RandomAlias, AppError> {
        let (set_description, description) = match patch.description {
            Some(value) => (true, value),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, RandomAliasRow>(&format!(
            r#"
            UPDATE relay_addresses SET
                enabled           = COALESCE($3, enabled),
                description       = CASE WHEN $4 THEN COALESCE($5, '') ELSE description END,
                block_list_emails = COALESCE($6, block_list_emails)
            WHERE user_id = $1 AND id = $2
            RETURNING {ALIAS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(id)
        .bind(patch.enabled)
        .bind(set_description)
        .bind(description)
        .bind(patch.block_list_emails)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(RandomAlias::from).ok_or_else(|| {
            AppError::not_found("Alias not found", json!({ "kind": "random", "id": id }))
        })
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM relay_addresses WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM relay_addresses WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_created_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM relay_addresses WHERE user_id = $1 AND created_at >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
