// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template email implementation of [`NotificationAdapter`].
//!
//! Talks to a Brevo-style transactional API: one JSON `POST /smtp/email` per
//! message, authenticated with an `api-key` header. A 2xx answer only counts
//! as delivered when it carries a `messageId`.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use kickoff_config::model::EmailConfig;
use kickoff_core::{
    AdapterType, DeliveryReceipt, HealthStatus, KickoffError, NotificationAdapter, PluginAdapter,
    TemplateParams, UpstreamError,
};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use tracing::debug;

use crate::types::{ApiErrorResponse, Recipient, TemplateEmailRequest, TemplateEmailResponse};

/// Transactional email client bound to one template.
#[derive(Debug, Clone)]
pub struct TemplateMailer {
    client: reqwest::Client,
    base_url: String,
    template_id: u64,
}

impl TemplateMailer {
    /// Creates a mailer for `template_id`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        template_id: u64,
        timeout: Duration,
    ) -> Result<Self, KickoffError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| KickoffError::Config(format!("invalid email API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("api-key", key);
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| KickoffError::Notification {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            template_id,
        })
    }

    /// Build from configuration. Fails when no API key is set.
    pub fn from_config(config: &EmailConfig) -> Result<Self, KickoffError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| KickoffError::Config("email.api_key is required".to_string()))?;
        Self::new(
            api_key,
            &config.api_base_url,
            config.template_id,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

fn transport_error(err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::transport("email request timed out")
    } else {
        UpstreamError::transport(format!("email request failed: {err}"))
    }
}

#[async_trait]
impl PluginAdapter for TemplateMailer {
    fn name(&self) -> &str {
        "template-email"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notification
    }

    async fn health_check(&self) -> Result<HealthStatus, KickoffError> {
        let response = match self
            .client
            .get(format!("{}/account", self.base_url))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Ok(HealthStatus::Unhealthy(transport_error(&e).to_string())),
        };
        let status = response.status();
        if status.is_success() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(format!("account lookup returned {status}")))
        }
    }
}

#[async_trait]
impl NotificationAdapter for TemplateMailer {
    async fn send_templated_email(
        &self,
        recipient: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, UpstreamError> {
        let request = TemplateEmailRequest {
            to: vec![Recipient { email: recipient }],
            template_id: self.template_id,
            params,
        };

        let response = self
            .client
            .post(format!("{}/smtp/email", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        debug!(status = %status, template_id = self.template_id, "email response received");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(UpstreamError::rate_limited(retry_after));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::transport(format!("unreadable email response: {e}")))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => UpstreamError::rejected(api_err.code, api_err.message),
                Err(_) => UpstreamError::rejected(
                    format!("http_{}", status.as_u16()),
                    format!("email API returned {status}: {body}"),
                ),
            });
        }

        // An empty or non-JSON success body still lacks an acknowledgment.
        let parsed: TemplateEmailResponse = serde_json::from_str(&body).unwrap_or_default();
        match parsed.message_id {
            Some(id) if !id.trim().is_empty() => Ok(DeliveryReceipt { message_id: id }),
            _ => Err(UpstreamError::unacknowledged(format!(
                "email API returned {status} without a messageId"
            ))),
        }
    }
}
