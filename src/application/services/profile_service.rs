//! Profile service: subdomain claims and premium entitlement.

use std::sync::Arc;

use crate::domain::entities::Profile;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use crate::utils::subdomain::{normalize_subdomain, validate_subdomain};
use serde::Serialize;
use serde_json::json;

/// Result of a subdomain availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainAvailability {
    pub subdomain: String,
    pub available: bool,
}

/// Service for profile reads and mutations.
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Lists the caller's profiles.
    pub async fn list_profiles(&self, user_id: i64) -> Result<Vec<Profile>, AppError> {
        self.repository.list_for_user(user_id).await
    }

    /// Returns the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no profile.
    pub async fn primary_profile(&self, user_id: i64) -> Result<Profile, AppError> {
        self.repository
            .list_for_user(user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::not_found("Profile not found", json!({ "user_id": user_id }))
            })
    }

    /// Returns a profile owned by `user_id`. Profiles of other users are
    /// reported as missing.
    pub async fn get_owned(&self, user_id: i64, profile_id: i64) -> Result<Profile, AppError> {
        self.repository
            .find_by_id(profile_id)
            .await?
            .filter(|profile| profile.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Profile not found", json!({ "id": profile_id })))
    }

    /// Checks whether a subdomain could be claimed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the subdomain is malformed or reserved.
    pub async fn check_subdomain(&self, input: &str) -> Result<SubdomainAvailability, AppError> {
        let subdomain = normalize_subdomain(input);
        validate_subdomain(&subdomain)?;

        let taken = self.repository.subdomain_taken(&subdomain).await?;

        Ok(SubdomainAvailability {
            subdomain,
            available: !taken,
        })
    }

    /// Claims a subdomain for one of the caller's profiles.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the profile does not belong to the caller
    /// - [`AppError::Forbidden`] if the profile is not premium
    /// - [`AppError::Validation`] if the subdomain is malformed or reserved
    /// - [`AppError::Conflict`] if the profile already has a subdomain or the
    ///   subdomain is taken
    pub async fn set_subdomain(
        &self,
        user_id: i64,
        profile_id: i64,
        input: &str,
    ) -> Result<Profile, AppError> {
        let profile = self.get_owned(user_id, profile_id).await?;

        if !profile.has_premium {
            return Err(AppError::forbidden(
                "A premium subscription is required to claim a subdomain",
                json!({ "profile_id": profile_id }),
            ));
        }

        if let Some(existing) = &profile.subdomain {
            return Err(AppError::conflict(
                "Profile already has a subdomain",
                json!({ "profile_id": profile_id, "subdomain": existing }),
            ));
        }

        let availability = self.check_subdomain(input).await?;
        if !availability.available {
            return Err(AppError::conflict(
                "Subdomain is already taken",
                json!({ "subdomain": availability.subdomain }),
            ));
        }

        let updated = self
            .repository
            .set_subdomain(profile_id, &availability.subdomain)
            .await?;

        tracing::info!(
            profile_id,
            subdomain = %availability.subdomain,
            "Subdomain claimed"
        );

        Ok(updated)
    }

    /// Grants or revokes premium on the caller's profile.
    pub async fn set_premium(&self, user_id: i64, has_premium: bool) -> Result<Profile, AppError> {
        let profile = self.primary_profile(user_id).await?;
        self.repository.set_premium(profile.id, has_premium).await
    }
}
