//! PostgreSQL implementation of profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Profile;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for profiles.
///
/// Subdomain uniqueness is enforced by the `profiles_subdomain_key` constraint;
/// the claim itself only succeeds while `subdomain IS NULL`.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    user_id: i64,
    has_premium: bool,
    subdomain: Option<String>,
    date_subscribed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user_id: row.user_id,
            has_premium: row.has_premium,
            subdomain: row.subdomain,
            date_subscribed: row.date_subscribed,
            created_at: row.created_at,
        }
    }
}

const PROFILE_COLUMNS: &str = "id, user_id, has_premium, subdomain, date_subscribed, created_at";

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM profiles WHERE LOWER(subdomain) = LOWER($1))",
        )
        .bind(subdomain)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(taken)
    }

    async fn set_subdomain(&self, id: i64, subdomain: &str) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE profiles SET subdomain = $2 WHERE id = $1 AND subdomain IS NULL RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(subdomain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::from).ok_or_else(|| {
            AppError::conflict(
                "Profile already has a subdomain",
                json!({ "profile_id": id }),
            )
        })
    }

    async fn set_premium(&self, id: i64, has_premium: bool) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profiles SET
                has_premium     = $2,
                date_subscribed = CASE WHEN $2 THEN COALESCE(date_subscribed, NOW()) ELSE date_subscribed END
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(has_premium)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::from)
            .ok_or_else(|| AppError::not_found("Profile not found", json!({ "id": id })))
    }
}
