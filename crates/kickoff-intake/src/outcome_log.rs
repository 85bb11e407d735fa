// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort outcome logging to the messaging log channel.

use std::sync::Arc;

use kickoff_core::{MessagingAdapter, Severity};
use tracing::{debug, error, info, warn};

/// Writes submission events to `tracing` and, when configured, to a log
/// channel through the messaging collaborator.
///
/// [`emit`](Self::emit) returns `()`: a failed post is traced at debug level
/// and dropped after one attempt, so no call site can propagate it.
#[derive(Clone)]
pub struct OutcomeLog {
    messaging: Arc<dyn MessagingAdapter>,
    destination: Option<String>,
}

impl OutcomeLog {
    pub fn new(messaging: Arc<dyn MessagingAdapter>, destination: Option<String>) -> Self {
        Self {
            messaging,
            destination,
        }
    }

    /// Record one event.
    pub async fn emit(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => info!(target: "kickoff::outcome", "{text}"),
            Severity::Warn => warn!(target: "kickoff::outcome", "{text}"),
            Severity::Error => error!(target: "kickoff::outcome", "{text}"),
        }

        let Some(destination) = self.destination.as_deref() else {
            return;
        };
        if let Err(e) = self.messaging.post_message(destination, text, severity).await {
            debug!(error = %e, destination, "outcome log post failed, dropping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::UpstreamError;
    use kickoff_test_utils::MockMessaging;

    #[tokio::test]
    async fn posts_to_destination() {
        let mock = Arc::new(MockMessaging::new());
        let log = OutcomeLog::new(mock.clone(), Some("C-log".into()));
        log.emit(Severity::Warn, "guest invite failed").await;
        assert_eq!(
            mock.posted().await,
            vec![(
                "C-log".to_string(),
                "guest invite failed".to_string(),
                Severity::Warn
            )]
        );
    }

    #[tokio::test]
    async fn no_destination_means_no_post() {
        let mock = Arc::new(MockMessaging::new());
        let log = OutcomeLog::new(mock.clone(), None);
        log.emit(Severity::Info, "hello").await;
        assert!(mock.calls().await.is_empty());
    }

    #[tokio::test]
    async fn failed_post_is_attempted_once_and_swallowed() {
        let mock = Arc::new(
            MockMessaging::new().failing_post_message(UpstreamError::transport("timed out")),
        );
        let log = OutcomeLog::new(mock.clone(), Some("C-log".into()));
        log.emit(Severity::Error, "boom").await;
        assert_eq!(mock.posted().await.len(), 1);
    }
}
