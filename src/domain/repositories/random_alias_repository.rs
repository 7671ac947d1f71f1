//! Repository trait for random (system-generated) aliases.

use crate::domain::entities::{AliasPatch, NewRandomAlias, RandomAlias};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for random aliases.
///
/// All lookups and mutations are scoped to the owning user; an alias owned by
/// someone else behaves as if it did not exist.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRandomAliasRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RandomAliasRepository: Send + Sync {
    /// Lists a user's random aliases in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<RandomAlias>, AppError>;

    /// Inserts a new random alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the address already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_alias: NewRandomAlias) -> Result<RandomAlias, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no alias matches `id` for this user.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        user_id: i64,
        id: i64,
        patch: AliasPatch,
    ) -> Result<RandomAlias, AppError>;

    /// Deletes an alias. Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;

    /// Counts a user's random aliases.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError>;

    /// Counts random aliases created by a user at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_created_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}
