// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging collaborator contract (team chat provider).

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelRef, Severity};

/// Adapter for the team-messaging provider.
///
/// Implementations must report "name already taken" as
/// [`UpstreamErrorKind::NameTaken`](crate::error::UpstreamErrorKind::NameTaken)
/// and provider throttling as
/// [`UpstreamErrorKind::RateLimited`](crate::error::UpstreamErrorKind::RateLimited),
/// distinct from every other failure.
#[async_trait]
pub trait MessagingAdapter: PluginAdapter {
    /// Creates a channel with exactly the given name.
    async fn create_channel(&self, name: &str) -> Result<ChannelRef, UpstreamError>;

    /// Lists the user ids belonging to a user group.
    async fn list_group_members(&self, group: &str) -> Result<Vec<String>, UpstreamError>;

    /// Invites workspace users to a channel.
    async fn invite_users(&self, channel_id: &str, users: &[String]) -> Result<(), UpstreamError>;

    /// Invites someone outside the workspace to a channel by email.
    async fn invite_external_guest(&self, email: &str, channel_id: &str)
    -> Result<(), UpstreamError>;

    /// Posts a message to a destination channel.
    async fn post_message(
        &self,
        destination: &str,
        text: &str,
        severity: Severity,
    ) -> Result<(), UpstreamError>;
}
