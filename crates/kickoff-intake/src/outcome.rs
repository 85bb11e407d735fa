// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal results of a submission.

use kickoff_core::{ChannelRef, UpstreamError};
use kickoff_limiter::Namespace;
use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;
use uuid::Uuid;

use crate::pipeline::Stage;

/// A non-critical step that failed without aborting the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PartialFailure {
    GroupInvite,
    GuestInvite,
    NotificationEmail,
}

/// Why a submission stopped before its channel was fully set up.
///
/// The `Display` text carries upstream detail and is meant for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalReason {
    /// Channel creation failed for a reason other than a name collision.
    #[error("channel creation failed: {0}")]
    ChannelCreation(UpstreamError),

    /// Every candidate name was already taken.
    #[error("exhausted collision retries after {attempts} attempts")]
    CollisionRetriesExhausted { attempts: u32 },

    /// Group membership could not be fetched.
    #[error("group membership fetch failed: {0}")]
    GroupMembers(UpstreamError),

    /// A stage that needs the channel ran before it existed.
    #[error("stage {stage} ran before a channel existed")]
    MissingChannel { stage: Stage },
}

/// The single result returned for every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The channel exists. Some follow-up steps may have failed.
    Succeeded {
        submission_id: Uuid,
        channel: ChannelRef,
        partial_failures: Vec<PartialFailure>,
    },
    /// The input was unusable. No quota beyond the origin's was consumed.
    RejectedValidation { errors: Vec<String> },
    /// One of the admission quotas is exhausted.
    RejectedRateLimit {
        namespace: Namespace,
        remaining: u32,
        reset_at_ms: u64,
        retry_after_secs: u64,
    },
    /// A fatal upstream step failed. No later step ran.
    FailedUpstream {
        submission_id: Uuid,
        reason: FatalReason,
    },
}

impl Outcome {
    /// Short state name for logs.
    pub fn state(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "succeeded",
            Self::RejectedValidation { .. } => "rejected_validation",
            Self::RejectedRateLimit { .. } => "rejected_rate_limit",
            Self::FailedUpstream { .. } => "failed_upstream",
        }
    }
}
