// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Kickoff integration tests.
//!
//! Provides scriptable collaborator mocks for fast, deterministic tests
//! without a messaging or email provider.
//!
//! # Components
//!
//! - [`MockMessaging`] - Messaging collaborator with scripted results and a call log
//! - [`MockNotification`] - Email collaborator with a scripted result and captured sends

pub mod mock_messaging;
pub mod mock_notification;

pub use mock_messaging::{MessagingCall, MockMessaging};
pub use mock_notification::{MockNotification, SentEmail};
