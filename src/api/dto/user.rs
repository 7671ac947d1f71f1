//! DTO for the user endpoint.

use serde::Serialize;

use crate::domain::entities::User;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { email: user.email }
    }
}
