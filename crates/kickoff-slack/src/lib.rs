// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack implementation of [`MessagingAdapter`] on top of slack-morphism.
//!
//! Channels are public conversations, workspace users join via
//! `conversations.invite`, and the submitter joins via a Slack Connect
//! invitation (`conversations.inviteShared`). Calls are never retried here.

pub mod types;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kickoff_config::model::SlackConfig;
use kickoff_core::{
    AdapterType, ChannelRef, HealthStatus, KickoffError, MessagingAdapter, PluginAdapter,
    Severity, UpstreamError,
};
use slack_morphism::errors::SlackClientError;
use slack_morphism::prelude::*;
use tracing::debug;

use crate::types::{InviteShared, InviteSharedResponse};

/// Slack messaging adapter, generic over the slack-morphism HTTP connector.
pub struct SlackMessaging<C = SlackClientHyperHttpsConnector>
where
    C: SlackClientHttpConnector + Send + Sync,
{
    client: Arc<SlackClient<C>>,
    token: SlackApiToken,
    timeout: Duration,
}

impl SlackMessaging {
    /// Build the adapter from configuration. Fails when no bot token is set.
    pub fn from_config(config: &SlackConfig) -> Result<Self, KickoffError> {
        let token = config
            .bot_token
            .as_deref()
            .ok_or_else(|| KickoffError::Config("slack.bot_token is required".to_string()))?;
        let connector = SlackClientHyperConnector::new()
            .map_err(|e| KickoffError::Messaging {
                message: format!("failed to build Slack HTTP connector: {e}"),
                source: Some(Box::new(e)),
            })?
            .with_slack_api_url(config.api_base_url.trim_end_matches('/'));
        Ok(Self::new(connector, token, Duration::from_secs(config.timeout_secs)))
    }
}

impl<C> SlackMessaging<C>
where
    C: SlackClientHttpConnector + Send + Sync,
{
    /// Wrap a connector already pointed at the Web API base URL.
    pub fn new(connector: C, bot_token: &str, timeout: Duration) -> Self {
        Self {
            client: Arc::new(SlackClient::new(connector)),
            token: SlackApiToken::new(SlackApiTokenValue::new(bot_token.to_string())),
            timeout,
        }
    }

    /// Await one Web API call under the configured timeout.
    async fn call<T, F>(&self, method: &str, request: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, SlackClientError>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(upstream_error(method, e)),
            Err(_) => Err(UpstreamError::transport(format!(
                "{method}: no response within {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Fold a slack-morphism failure into the typed upstream taxonomy.
fn upstream_error(method: &str, err: SlackClientError) -> UpstreamError {
    match err {
        SlackClientError::ApiError(api) if api.code == "name_taken" => {
            UpstreamError::name_taken(format!("{method}: channel name already exists"))
        }
        SlackClientError::ApiError(api) if api.code == "ratelimited" => {
            UpstreamError::rate_limited(None)
        }
        SlackClientError::ApiError(api) => {
            let detail = format!("{method} failed: {}", api.code);
            UpstreamError::rejected(api.code, detail)
        }
        SlackClientError::RateLimitError(limit) => UpstreamError::rate_limited(limit.retry_after),
        SlackClientError::HttpError(http) => UpstreamError::rejected(
            format!("http_{}", http.status_code.as_u16()),
            format!("{method} returned {}", http.status_code),
        ),
        other => UpstreamError::transport(format!("{method}: {other}")),
    }
}

/// Prefix shown in the log channel for each severity.
fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => ":information_source:",
        Severity::Warn => ":warning:",
        Severity::Error => ":rotating_light:",
    }
}

#[async_trait]
impl<C> PluginAdapter for SlackMessaging<C>
where
    C: SlackClientHttpConnector + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "slack"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Messaging
    }

    async fn health_check(&self) -> Result<HealthStatus, KickoffError> {
        let session = self.client.open_session(&self.token);
        match self.call("auth.test", session.auth_test()).await {
            Ok(auth) => {
                debug!(team_id = ?auth.team_id, user_id = ?auth.user_id, "slack auth.test ok");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl<C> MessagingAdapter for SlackMessaging<C>
where
    C: SlackClientHttpConnector + Send + Sync + 'static,
{
    async fn create_channel(&self, name: &str) -> Result<ChannelRef, UpstreamError> {
        let session = self.client.open_session(&self.token);
        let request =
            SlackApiConversationsCreateRequest::new(name.to_string()).with_is_private(false);
        let response = self
            .call("conversations.create", session.conversations_create(&request))
            .await?;
        let channel = response.channel;
        Ok(ChannelRef {
            id: channel.id.0,
            name: channel.name.unwrap_or_else(|| name.to_string()),
        })
    }

    async fn list_group_members(&self, group: &str) -> Result<Vec<String>, UpstreamError> {
        let session = self.client.open_session(&self.token);
        let request =
            SlackApiUserGroupsUsersListRequest::new(SlackUserGroupId::new(group.to_string()));
        let response = self
            .call("usergroups.users.list", session.usergroups_users_list(&request))
            .await?;
        Ok(response.users.into_iter().map(|user| user.0).collect())
    }

    async fn invite_users(&self, channel_id: &str, users: &[String]) -> Result<(), UpstreamError> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiConversationsInviteRequest::new(
            SlackChannelId::new(channel_id.to_string()),
            users.iter().cloned().map(SlackUserId::new).collect(),
        );
        match self
            .call("conversations.invite", session.conversations_invite(&request))
            .await
        {
            Ok(_) => Ok(()),
            // Everyone requested is already a member; the goal state holds.
            Err(e) if e.code == "already_in_channel" => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn invite_external_guest(
        &self,
        email: &str,
        channel_id: &str,
    ) -> Result<(), UpstreamError> {
        let session = self.client.open_session(&self.token);
        let request = InviteShared {
            channel: channel_id,
            emails: vec![email],
            external_limited: true,
        };
        let response: InviteSharedResponse = self
            .call(
                "conversations.inviteShared",
                session
                    .http_session_api
                    .http_post("conversations.inviteShared", &request, None),
            )
            .await?;
        debug!(channel_id, invite_id = ?response.invite_id, "slack connect invite sent");
        Ok(())
    }

    async fn post_message(
        &self,
        destination: &str,
        text: &str,
        severity: Severity,
    ) -> Result<(), UpstreamError> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiChatPostMessageRequest::new(
            SlackChannelId::new(destination.to_string()),
            SlackMessageContent::new().with_text(format!("{} {text}", severity_marker(severity))),
        )
        .with_unfurl_links(false);
        self.call("chat.postMessage", session.chat_post_message(&request))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_token() {
        let err = SlackMessaging::from_config(&SlackConfig::default()).err().unwrap();
        assert!(err.to_string().contains("slack.bot_token"));
    }

    #[test]
    fn severity_markers_differ() {
        assert_ne!(severity_marker(Severity::Info), severity_marker(Severity::Warn));
        assert_ne!(severity_marker(Severity::Warn), severity_marker(Severity::Error));
    }
}
