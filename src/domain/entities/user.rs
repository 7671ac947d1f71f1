//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account holder. Only the email is shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
