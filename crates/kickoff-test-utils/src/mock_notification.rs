// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use kickoff_core::{
    AdapterType, DeliveryReceipt, HealthStatus, KickoffError, NotificationAdapter, PluginAdapter,
    TemplateParams, UpstreamError,
};

/// A captured `send_templated_email` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub params: TemplateParams,
}

/// Email collaborator that succeeds with a fresh message id unless told to fail.
pub struct MockNotification {
    error: Option<UpstreamError>,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockNotification {
    pub fn new() -> Self {
        Self {
            error: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every send fail with `err`.
    pub fn failing(mut self, err: UpstreamError) -> Self {
        self.error = Some(err);
        self
    }

    /// Every send attempt, including failed ones.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

impl Default for MockNotification {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockNotification {
    fn name(&self) -> &str {
        "mock-notification"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notification
    }

    async fn health_check(&self) -> Result<HealthStatus, KickoffError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl NotificationAdapter for MockNotification {
    async fn send_templated_email(
        &self,
        recipient: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, UpstreamError> {
        self.sent.lock().await.push(SentEmail {
            recipient: recipient.to_string(),
            params: params.clone(),
        });
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(DeliveryReceipt {
                message_id: format!("mock-email-{}", uuid::Uuid::new_v4()),
            }),
        }
    }
}
