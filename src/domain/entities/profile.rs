//! Profile entity: premium entitlement and custom subdomain of a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user alias settings.
///
/// A user owns exactly one profile. The subdomain can be claimed once and only
/// by a premium profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub has_premium: bool,
    pub subdomain: Option<String>,
    pub date_subscribed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn has_subdomain(&self) -> bool {
        self.subdomain.is_some()
    }
}
