//! DTOs for profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Profile;

/// Profile as returned by `GET /api/profiles`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub has_premium: bool,
    pub subdomain: Option<String>,
    pub date_subscribed: Option<DateTime<Utc>>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            has_premium: profile.has_premium,
            subdomain: profile.subdomain,
            date_subscribed: profile.date_subscribed,
        }
    }
}

/// Request body for `PATCH /api/profiles/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 63, message = "Subdomain must be 1-63 characters"))]
    pub subdomain: String,
}

/// Query for `GET /api/profiles/subdomain`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubdomainQuery {
    #[validate(length(min = 1, max = 63, message = "Subdomain must be 1-63 characters"))]
    pub subdomain: String,
}
