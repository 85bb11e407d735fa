// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kickoff intake service.
//!
//! This crate provides the collaborator contracts, the typed upstream error,
//! and the shared types used throughout the workspace. Wire clients implement
//! the traits defined here; the orchestrator consumes them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{KickoffError, UpstreamError, UpstreamErrorKind};
pub use types::{AdapterType, ChannelRef, DeliveryReceipt, HealthStatus, Severity, TemplateParams};

pub use traits::{MessagingAdapter, NotificationAdapter, PluginAdapter};
