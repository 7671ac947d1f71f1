//! Background worker persisting upgrade click events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::repositories::TrackingRepository;
use crate::domain::upgrade_event::UpgradeClickEvent;

const MAX_RETRIES: usize = 3;

/// Drains the upgrade click channel until all senders are dropped.
///
/// Each event is written with exponential backoff (10ms base, three retries).
/// Events that still fail are logged and counted, never re-queued.
pub async fn run_upgrade_worker(
    mut rx: mpsc::Receiver<UpgradeClickEvent>,
    repository: Arc<dyn TrackingRepository>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(MAX_RETRIES);

        let result = Retry::spawn(strategy, || {
            let repository = repository.clone();
            let event = event.clone();
            async move { repository.record_upgrade_click(&event).await }
        })
        .await;

        match result {
            Ok(()) => {
                tracing::debug!(
                    user_id = event.user_id,
                    country = %event.country_code,
                    period = event.period.as_str(),
                    "Upgrade click recorded"
                );
            }
            Err(e) => {
                metrics::counter!("upgrade_clicks_failed_total").increment(1);
                tracing::error!(
                    error = %e,
                    user_id = event.user_id,
                    "Failed to record upgrade click after retries"
                );
            }
        }
    }

    tracing::info!("Upgrade worker stopped: channel closed");
}
