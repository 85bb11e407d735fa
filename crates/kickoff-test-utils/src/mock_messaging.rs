// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging collaborator for deterministic testing.
//!
//! `MockMessaging` implements `MessagingAdapter` with scripted results per
//! method and records every call, in order, for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use kickoff_core::{
    AdapterType, ChannelRef, HealthStatus, KickoffError, MessagingAdapter, PluginAdapter, Severity,
    UpstreamError,
};

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagingCall {
    CreateChannel(String),
    ListGroupMembers(String),
    InviteUsers {
        channel_id: String,
        users: Vec<String>,
    },
    InviteExternalGuest {
        email: String,
        channel_id: String,
    },
    PostMessage {
        destination: String,
        text: String,
        severity: Severity,
    },
}

/// A scriptable messaging collaborator.
///
/// - **create results**: queued with [`with_create_result`](Self::with_create_result);
///   once the queue is empty, creation succeeds with id `C-<name>`.
/// - **everything else**: succeeds unless a failure was configured with the
///   matching `failing_*` builder.
pub struct MockMessaging {
    create_results: Mutex<VecDeque<Result<ChannelRef, UpstreamError>>>,
    members: Result<Vec<String>, UpstreamError>,
    invite_users_error: Option<UpstreamError>,
    invite_guest_error: Option<UpstreamError>,
    post_error: Option<UpstreamError>,
    calls: Arc<Mutex<Vec<MessagingCall>>>,
}

impl MockMessaging {
    /// Create a mock where every call succeeds and the group has no members.
    pub fn new() -> Self {
        Self {
            create_results: Mutex::new(VecDeque::new()),
            members: Ok(Vec::new()),
            invite_users_error: None,
            invite_guest_error: None,
            post_error: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue the result of the next `create_channel` call.
    pub fn with_create_result(mut self, result: Result<ChannelRef, UpstreamError>) -> Self {
        self.create_results.get_mut().push_back(result);
        self
    }

    /// Queue `times` consecutive "name taken" answers.
    pub fn with_name_taken(mut self, times: usize) -> Self {
        let queue = self.create_results.get_mut();
        for _ in 0..times {
            queue.push_back(Err(UpstreamError::name_taken("channel name already exists")));
        }
        self
    }

    /// Set the user ids returned by `list_group_members`.
    pub fn with_group_members(mut self, members: Vec<String>) -> Self {
        self.members = Ok(members);
        self
    }

    /// Make `list_group_members` fail.
    pub fn failing_group_members(mut self, err: UpstreamError) -> Self {
        self.members = Err(err);
        self
    }

    /// Make `invite_users` fail.
    pub fn failing_invite_users(mut self, err: UpstreamError) -> Self {
        self.invite_users_error = Some(err);
        self
    }

    /// Make `invite_external_guest` fail.
    pub fn failing_invite_guest(mut self, err: UpstreamError) -> Self {
        self.invite_guest_error = Some(err);
        self
    }

    /// Make `post_message` fail.
    pub fn failing_post_message(mut self, err: UpstreamError) -> Self {
        self.post_error = Some(err);
        self
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<MessagingCall> {
        self.calls.lock().await.clone()
    }

    /// Names passed to `create_channel`, in order.
    pub async fn create_attempts(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                MessagingCall::CreateChannel(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(destination, text, severity)` of every `post_message` call.
    pub async fn posted(&self) -> Vec<(String, String, Severity)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                MessagingCall::PostMessage {
                    destination,
                    text,
                    severity,
                } => Some((destination.clone(), text.clone(), *severity)),
                _ => None,
            })
            .collect()
    }

    /// Whether any call other than create/list/post reached the mock.
    pub async fn invited_anyone(&self) -> bool {
        self.calls.lock().await.iter().any(|c| {
            matches!(
                c,
                MessagingCall::InviteUsers { .. } | MessagingCall::InviteExternalGuest { .. }
            )
        })
    }

    async fn record(&self, call: MessagingCall) {
        self.calls.lock().await.push(call);
    }
}

impl Default for MockMessaging {
    fn default() -> Self {
        Self::new()
    }
}

fn scripted(error: &Option<UpstreamError>) -> Result<(), UpstreamError> {
    match error {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

#[async_trait]
impl PluginAdapter for MockMessaging {
    fn name(&self) -> &str {
        "mock-messaging"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Messaging
    }

    async fn health_check(&self) -> Result<HealthStatus, KickoffError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl MessagingAdapter for MockMessaging {
    async fn create_channel(&self, name: &str) -> Result<ChannelRef, UpstreamError> {
        self.record(MessagingCall::CreateChannel(name.to_string()))
            .await;
        match self.create_results.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(ChannelRef {
                id: format!("C-{name}"),
                name: name.to_string(),
            }),
        }
    }

    async fn list_group_members(&self, group: &str) -> Result<Vec<String>, UpstreamError> {
        self.record(MessagingCall::ListGroupMembers(group.to_string()))
            .await;
        self.members.clone()
    }

    async fn invite_users(&self, channel_id: &str, users: &[String]) -> Result<(), UpstreamError> {
        self.record(MessagingCall::InviteUsers {
            channel_id: channel_id.to_string(),
            users: users.to_vec(),
        })
        .await;
        scripted(&self.invite_users_error)
    }

    async fn invite_external_guest(
        &self,
        email: &str,
        channel_id: &str,
    ) -> Result<(), UpstreamError> {
        self.record(MessagingCall::InviteExternalGuest {
            email: email.to_string(),
            channel_id: channel_id.to_string(),
        })
        .await;
        scripted(&self.invite_guest_error)
    }

    async fn post_message(
        &self,
        destination: &str,
        text: &str,
        severity: Severity,
    ) -> Result<(), UpstreamError> {
        self.record(MessagingCall::PostMessage {
            destination: destination.to_string(),
            text: text.to_string(),
            severity,
        })
        .await;
        scripted(&self.post_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_defaults_to_success_after_queue_drains() {
        let mock = MockMessaging::new().with_name_taken(1);

        let first = mock.create_channel("acme").await.unwrap_err();
        assert!(first.is_name_taken());

        let second = mock.create_channel("acme-2").await.unwrap();
        assert_eq!(second.id, "C-acme-2");
        assert_eq!(second.name, "acme-2");

        assert_eq!(mock.create_attempts().await, vec!["acme", "acme-2"]);
    }

    #[tokio::test]
    async fn queued_create_result_is_returned_once() {
        let mock = MockMessaging::new().with_create_result(Err(UpstreamError::rejected(
            "restricted_action",
            "not allowed",
        )));
        let err = mock.create_channel("acme").await.unwrap_err();
        assert_eq!(err.code, "restricted_action");
        assert!(mock.create_channel("acme").await.is_ok());
    }

    #[tokio::test]
    async fn configured_failures_are_returned_and_calls_recorded() {
        let mock = MockMessaging::new()
            .with_group_members(vec!["U1".into()])
            .failing_invite_guest(UpstreamError::rejected("not_allowed", "guests disabled"));

        assert_eq!(mock.list_group_members("S1").await.unwrap(), vec!["U1"]);
        assert!(mock.invite_users("C1", &["U1".into()]).await.is_ok());
        assert!(mock.invite_external_guest("a@b.co", "C1").await.is_err());
        assert!(mock.invited_anyone().await);
        assert_eq!(mock.calls().await.len(), 3);
    }

    #[tokio::test]
    async fn posted_messages_are_captured() {
        let mock = MockMessaging::new().failing_post_message(UpstreamError::transport("down"));
        assert!(mock.post_message("#log", "hello", Severity::Warn).await.is_err());
        assert_eq!(
            mock.posted().await,
            vec![("#log".to_string(), "hello".to_string(), Severity::Warn)]
        );
    }
}
