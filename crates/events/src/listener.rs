//! Postgres `LISTEN` loop feeding the [`ChangeFeed`].
//!
//! Every content table has a statement-level trigger that sends
//! `NOTIFY content_changes '<table>:<op>'`. [`ChangeListener`] holds one
//! dedicated connection listening on that channel and republishes each
//! notification in-process.

use std::sync::Arc;
use std::time::Duration;

use folio_core::catalog::{ChangeKind, Collection};
use folio_db::DbPool;
use sqlx::postgres::PgListener;
use tokio_util::sync::CancellationToken;

use crate::feed::{ChangeEvent, ChangeFeed};

/// Notification channel written by the content-table triggers.
pub const CHANNEL: &str = "content_changes";

/// Pause after a failed receive before trying again.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Background service forwarding database notifications to the feed.
pub struct ChangeListener;

impl ChangeListener {
    /// Run until `cancel` fires.
    ///
    /// `PgListener` re-establishes a dropped connection on the next receive.
    /// Notifications sent while disconnected are lost, so a dropped
    /// connection publishes a change of unknown kind on every collection.
    pub async fn run(pool: DbPool, feed: Arc<ChangeFeed>, cancel: CancellationToken) {
        let mut listener = match Self::connect(&pool).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(error = %e, "Change listener could not start");
                return;
            }
        };
        tracing::info!(channel = CHANNEL, "Change listener started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Change listener stopping");
                    break;
                }
                received = listener.try_recv() => match received {
                    Ok(Some(notification)) => {
                        match ChangeEvent::from_payload(notification.payload()) {
                            Some(event) => feed.publish(event),
                            None => tracing::debug!(
                                payload = notification.payload(),
                                "Ignoring notification for non-content table"
                            ),
                        }
                    }
                    Ok(None) => {
                        tracing::warn!("Change listener connection lost, reconnecting");
                        Self::broadcast_resync(&feed);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Change listener receive failed");
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                },
            }
        }
    }

    async fn connect(pool: &DbPool) -> Result<PgListener, sqlx::Error> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(CHANNEL).await?;
        Ok(listener)
    }

    fn broadcast_resync(feed: &ChangeFeed) {
        for collection in Collection::ALL {
            feed.publish(ChangeEvent::new(collection, ChangeKind::Unknown));
        }
    }
}
