use crate::engine::ReconciliationEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Start the periodic sync task.
///
/// Runs one pass to completion, sleeps the interval, and repeats until the
/// token is cancelled. A cancellation that arrives during a pass takes
/// effect once the pass has finished, so passes never overlap and are never
/// cut short.
pub fn start_sync_loop(
    engine: Arc<ReconciliationEngine>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Sync scheduler started, interval {}s", interval.as_secs());

        loop {
            info!("Starting sync pass");
            match engine.sync().await {
                Ok(report) => info!("Sync pass complete: {}", report),
                Err(e) => error!("Sync pass failed: {}", e),
            }

            tokio::select! {
                _ = sleep(interval) => {}
                _ = shutdown.cancelled() => {
                    info!("Sync scheduler shutting down");
                    break;
                }
            }
        }
    })
}
