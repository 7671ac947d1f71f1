//! Repository trait for custom (subdomain) aliases.

use crate::domain::entities::{AliasPatch, DomainAlias, NewDomainAlias};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for custom aliases living under a profile subdomain.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainAliasRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainAliasRepository: Send + Sync {
    /// Lists a user's custom aliases in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<DomainAlias>, AppError>;

    /// Inserts a new custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has this address.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_alias: NewDomainAlias) -> Result<DomainAlias, AppError>;

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
    ) -> Result<DomainAlias, AppError>;

    /// Deletes an alias. Returns `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;

    /// Counts custom aliases created by a user at or after `since`.
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
