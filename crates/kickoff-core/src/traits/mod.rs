// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Both collaborators extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so the orchestrator can hold them as trait objects.

pub mod adapter;
pub mod messaging;
pub mod notification;

pub use adapter::PluginAdapter;
pub use messaging::MessagingAdapter;
pub use notification::NotificationAdapter;
