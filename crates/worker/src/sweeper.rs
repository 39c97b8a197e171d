//! Session TTL sweeper.
//!
//! Postgres has no row TTL, so [`SessionSweeper`] periodically
//! hard-deletes sessions whose fixed lifetime (counted from `created_at`) has
//! elapsed.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use vendorpo_db::repositories::SessionRepo;
use vendorpo_db::DbPool;

/// Background service that purges expired sessions on a fixed interval.
pub struct SessionSweeper {
    pool: DbPool,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(pool: DbPool, interval: Duration) -> Self {
        Self { pool, interval }
    }

    /// Run the sweep loop until `cancel` fires.
    ///
    /// The first sweep happens immediately. A failed sweep is logged and the
    /// loop carries on with the next tick.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Session sweeper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!(error = %e, "Failed to purge expired sessions");
                    }
                }
            }
        }
    }

    /// Purge every session expired as of now. Returns the number removed.
    pub async fn sweep_once(&self) -> Result<u64, sqlx::Error> {
        let purged = SessionRepo::purge_expired(&self.pool, Utc::now()).await?;
        if purged > 0 {
            tracing::info!(count = purged, "Purged expired sessions");
        } else {
            tracing::debug!("No expired sessions to purge");
        }
        Ok(purged)
    }
}
