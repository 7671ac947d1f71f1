//! Upgrade call-to-action click event for asynchronous tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::BillingPeriod;

/// A click on the dashboard's upgrade call-to-action.
///
/// Passed from the web handler to the background worker via a channel so the
/// redirect to checkout never waits on the database.
///
/// # Usage Flow
///
/// 1. Created in the upgrade handler with the caller's country
/// 2. Sent to the channel (non-blocking, dropped when full)
/// 3. Processed by [`crate::domain::upgrade_worker::run_upgrade_worker`]
/// 4. Persisted via [`crate::domain::repositories::TrackingRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeClickEvent {
    pub user_id: i64,
    pub country_code: String,
    pub period: BillingPeriod,
    pub clicked_at: DateTime<Utc>,
}

impl UpgradeClickEvent {
    /// Creates an event stamped with the current time.
    pub fn new(user_id: i64, country_code: impl Into<String>, period: BillingPeriod) -> Self {
        Self {
            user_id,
            country_code: country_code.into(),
            period,
            clicked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_event_creation() {
        let before = Utc::now();
        let event = UpgradeClickEvent::new(42, "DE", BillingPeriod::Yearly);

        assert_eq!(event.user_id, 42);
        assert_eq!(event.country_code, "DE");
        assert_eq!(event.period, BillingPeriod::Yearly);
        assert!(event.clicked_at >= before);
    }
}
