// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic removal of expired admission records.

use std::sync::Arc;
use std::time::Duration;

use kickoff_limiter::{AdmissionLimiter, Clock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Sweep `limiter` every `interval` until `shutdown` fires.
///
/// A zero interval disables sweeping and returns `None`.
pub fn spawn_sweeper<C: Clock + 'static>(
    limiter: Arc<AdmissionLimiter<C>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        return None;
    }
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = limiter.sweep();
                    debug!(removed, remaining = limiter.len(), "swept admission records");
                }
            }
        }
    }))
}

/// Wait for a sweeper to stop. Returns `false` when the task panicked or was aborted.
pub async fn join_sweeper(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "limiter sweeper task failed");
            false
        }
    }
}
