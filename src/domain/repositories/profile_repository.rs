//! Repository trait for alias profiles.

use crate::domain::entities::Profile;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for profiles.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Lists the profiles owned by a user (at most one in practice).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Profile>, AppError>;

    /// Finds a profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>, AppError>;

    /// Returns true if any profile already claimed `subdomain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, AppError>;

    /// Claims `subdomain` for a profile that has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the profile already has a subdomain or
    /// another profile claimed it concurrently.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_subdomain(&self, id: i64, subdomain: &str) -> Result<Profile, AppError>;

    /// Grants or revokes the premium entitlement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the profile does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_premium(&self, id: i64, has_premium: bool) -> Result<Profile, AppError>;
}
