//! Repository trait for upgrade click tracking.

use crate::domain::upgrade_event::UpgradeClickEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Sink for upgrade call-to-action clicks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Persists one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_upgrade_click(&self, event: &UpgradeClickEvent) -> Result<(), AppError>;

    /// Counts recorded clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_upgrade_clicks(&self) -> Result<i64, AppError>;
}
