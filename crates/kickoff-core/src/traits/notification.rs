// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification collaborator contract (transactional email provider).

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DeliveryReceipt, TemplateParams};

/// Adapter for the email-delivery provider.
#[async_trait]
pub trait NotificationAdapter: PluginAdapter {
    /// Sends a templated email.
    ///
    /// Must return `Err` with
    /// [`UpstreamErrorKind::Unacknowledged`](crate::error::UpstreamErrorKind::Unacknowledged)
    /// when the provider reports success without a message id.
    async fn send_templated_email(
        &self,
        recipient: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, UpstreamError>;
}
