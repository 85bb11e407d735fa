// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kickoff intake service.
//!
//! [`KickoffError`] is the workspace-wide error for wiring and lifecycle
//! failures. [`UpstreamError`] is the typed error every collaborator call
//! returns, so the orchestrator can branch on [`UpstreamErrorKind`] instead of
//! inspecting response shapes.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across Kickoff crates for non-collaborator failures.
#[derive(Debug, Error)]
pub enum KickoffError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Messaging provider client could not be built or reached.
    #[error("messaging error: {message}")]
    Messaging {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notification provider client could not be built or reached.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP server errors (bind failure, serve loop exit).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Machine-readable classification of a collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// The requested channel name already exists.
    NameTaken,
    /// The collaborator throttled the call.
    RateLimited {
        /// Hint from the collaborator, when it sent one.
        retry_after: Option<Duration>,
    },
    /// The collaborator understood the call and refused it.
    Rejected,
    /// Network failure, timeout, or an unreadable response.
    Transport,
    /// A success status arrived without the positive acknowledgment the contract requires.
    Unacknowledged,
}

/// Error returned by every messaging and notification collaborator call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {detail}")]
pub struct UpstreamError {
    /// Classification used for control flow.
    pub kind: UpstreamErrorKind,
    /// Provider error code (e.g. `name_taken`, `http_503`).
    pub code: String,
    /// Human-readable detail for logs. Never shown to end users.
    pub detail: String,
}

impl UpstreamError {
    /// Build an error with an explicit kind.
    pub fn new(kind: UpstreamErrorKind, code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            detail: detail.into(),
        }
    }

    /// The channel name is already in use.
    pub fn name_taken(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::NameTaken, "name_taken", detail)
    }

    /// The collaborator rate limited the call.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        let detail = match retry_after {
            Some(d) => format!("retry after {}s", d.as_secs()),
            None => "no retry hint".to_string(),
        };
        Self::new(
            UpstreamErrorKind::RateLimited { retry_after },
            "ratelimited",
            detail,
        )
    }

    /// The collaborator refused the call with the given provider code.
    pub fn rejected(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Rejected, code, detail)
    }

    /// The call never produced a usable response.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Transport, "transport", detail)
    }

    /// A success response carried no acknowledgment identifier.
    pub fn unacknowledged(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Unacknowledged, "missing_ack", detail)
    }

    /// Whether this is the "name already taken" signal.
    pub fn is_name_taken(&self) -> bool {
        self.kind == UpstreamErrorKind::NameTaken
    }

    /// Retry hint carried by a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self.kind {
            UpstreamErrorKind::RateLimited { retry_after } => retry_after,
            _ => None,
        }
    }
}
