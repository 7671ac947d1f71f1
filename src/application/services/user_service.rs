//! User account service.

use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;
use validator::ValidateEmail;

/// Reads and creates user accounts.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn get_user(&self, user_id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Lists the users visible to the caller: only the caller.
    pub async fn list_users(&self, user_id: i64) -> Result<Vec<User>, AppError> {
        Ok(vec![self.get_user(user_id).await?])
    }

    /// Registers a user and its free profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn create_user(&self, email: &str) -> Result<User, AppError> {
        let email = email.trim();

        if !email.validate_email() {
            return Err(AppError::bad_request(
                "Invalid email address",
                json!({ "email": email }),
            ));
        }

        self.repository.create(email).await
    }

    /// Counts registered accounts. Doubles as the database health probe.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account uses this email.
    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.repository
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }
}
