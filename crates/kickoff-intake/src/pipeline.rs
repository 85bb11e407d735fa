// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The external side of a submission as an ordered list of stages.
//!
//! Each stage reads and extends a [`PipelineContext`] and answers with a
//! [`StageOutcome`]. [`Pipeline::run`] walks [`Stage::ALL`] in order, records
//! partial failures, and stops at the first abort. Stages can be driven one at
//! a time with [`Pipeline::run_stage`].

use std::sync::Arc;

use kickoff_core::{
    ChannelRef, MessagingAdapter, NotificationAdapter, Severity, TemplateParams, UpstreamError,
};
use strum::Display;
use tracing::debug;
use uuid::Uuid;

use crate::outcome::{FatalReason, PartialFailure};
use crate::outcome_log::OutcomeLog;
use crate::validation::ValidSubmission;

/// Channel creation attempts per submission, the first unsuffixed name included.
pub const MAX_CREATE_ATTEMPTS: u32 = 10;

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    CreateChannel,
    FetchGroupMembers,
    InviteGroup,
    InviteGuest,
    SendNotificationEmail,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::CreateChannel,
        Stage::FetchGroupMembers,
        Stage::InviteGroup,
        Stage::InviteGuest,
        Stage::SendNotificationEmail,
    ];
}

/// What a stage tells the pipeline to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Continue,
    /// The step failed but the submission goes on.
    Partial {
        failure: PartialFailure,
        error: UpstreamError,
    },
    /// The submission stops here.
    Abort(FatalReason),
}

/// State threaded through the stages of one submission.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub submission_id: Uuid,
    pub submission: ValidSubmission,
    /// Set by [`Stage::CreateChannel`].
    pub channel: Option<ChannelRef>,
    /// Set by [`Stage::FetchGroupMembers`]; empty when no group is configured.
    pub group_members: Vec<String>,
    pub partial_failures: Vec<PartialFailure>,
}

impl PipelineContext {
    pub fn new(submission_id: Uuid, submission: ValidSubmission) -> Self {
        Self {
            submission_id,
            submission,
            channel: None,
            group_members: Vec::new(),
            partial_failures: Vec::new(),
        }
    }

    fn channel_for(&self, stage: Stage) -> Result<ChannelRef, FatalReason> {
        self.channel
            .clone()
            .ok_or(FatalReason::MissingChannel { stage })
    }
}

/// Name tried on the given 1-based creation attempt.
pub fn candidate_name(identifier: &str, attempt: u32) -> String {
    if attempt <= 1 {
        identifier.to_string()
    } else {
        format!("{identifier}-{attempt}")
    }
}

/// The collaborators and settings the stages run against.
#[derive(Clone)]
pub struct Pipeline {
    messaging: Arc<dyn MessagingAdapter>,
    notification: Arc<dyn NotificationAdapter>,
    group_id: Option<String>,
    log: OutcomeLog,
}

impl Pipeline {
    pub fn new(
        messaging: Arc<dyn MessagingAdapter>,
        notification: Arc<dyn NotificationAdapter>,
        group_id: Option<String>,
        log: OutcomeLog,
    ) -> Self {
        Self {
            messaging,
            notification,
            group_id,
            log,
        }
    }

    /// Run every stage in order and return the created channel.
    ///
    /// Partial failures are logged at warning level and appended to
    /// `ctx.partial_failures`. Fatal reasons are returned unlogged.
    pub async fn run(&self, ctx: &mut PipelineContext) -> Result<ChannelRef, FatalReason> {
        for stage in Stage::ALL {
            match self.run_stage(stage, ctx).await {
                StageOutcome::Continue => {}
                StageOutcome::Partial { failure, error } => {
                    let text = format!(
                        "Submission {}: {failure} failed for channel {}: {error}",
                        ctx.submission_id,
                        ctx.channel.as_ref().map_or("-", |c| c.name.as_str()),
                    );
                    self.log.emit(Severity::Warn, &text).await;
                    ctx.partial_failures.push(failure);
                }
                StageOutcome::Abort(reason) => return Err(reason),
            }
        }
        ctx.channel_for(Stage::CreateChannel)
    }

    /// Run a single stage against `ctx`.
    pub async fn run_stage(&self, stage: Stage, ctx: &mut PipelineContext) -> StageOutcome {
        debug!(submission_id = %ctx.submission_id, stage = %stage, "running stage");
        match stage {
            Stage::CreateChannel => self.create_channel(ctx).await,
            Stage::FetchGroupMembers => self.fetch_group_members(ctx).await,
            Stage::InviteGroup => self.invite_group(ctx).await,
            Stage::InviteGuest => self.invite_guest(ctx).await,
            Stage::SendNotificationEmail => self.send_notification_email(ctx).await,
        }
    }

    async fn create_channel(&self, ctx: &mut PipelineContext) -> StageOutcome {
        let identifier = &ctx.submission.identifier;
        debug_assert!(kickoff_slug::is_canonical(identifier));
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let name = candidate_name(identifier, attempt);
            match self.messaging.create_channel(&name).await {
                Ok(channel) => {
                    ctx.channel = Some(channel);
                    return StageOutcome::Continue;
                }
                Err(e) if e.is_name_taken() => {
                    debug!(name = %name, attempt, "channel name taken");
                }
                Err(e) => return StageOutcome::Abort(FatalReason::ChannelCreation(e)),
            }
        }
        StageOutcome::Abort(FatalReason::CollisionRetriesExhausted {
            attempts: MAX_CREATE_ATTEMPTS,
        })
    }

    async fn fetch_group_members(&self, ctx: &mut PipelineContext) -> StageOutcome {
        let Some(group) = self.group_id.as_deref() else {
            return StageOutcome::Continue;
        };
        match self.messaging.list_group_members(group).await {
            Ok(members) => {
                ctx.group_members = members;
                StageOutcome::Continue
            }
            Err(e) => StageOutcome::Abort(FatalReason::GroupMembers(e)),
        }
    }

    async fn invite_group(&self, ctx: &mut PipelineContext) -> StageOutcome {
        let channel = match ctx.channel_for(Stage::InviteGroup) {
            Ok(c) => c,
            Err(reason) => return StageOutcome::Abort(reason),
        };
        if ctx.group_members.is_empty() {
            return StageOutcome::Continue;
        }
        match self
            .messaging
            .invite_users(&channel.id, &ctx.group_members)
            .await
        {
            Ok(()) => StageOutcome::Continue,
            Err(error) => StageOutcome::Partial {
                failure: PartialFailure::GroupInvite,
                error,
            },
        }
    }

    async fn invite_guest(&self, ctx: &mut PipelineContext) -> StageOutcome {
        let channel = match ctx.channel_for(Stage::InviteGuest) {
            Ok(c) => c,
            Err(reason) => return StageOutcome::Abort(reason),
        };
        match self
            .messaging
            .invite_external_guest(&ctx.submission.email, &channel.id)
            .await
        {
            Ok(()) => StageOutcome::Continue,
            Err(error) => StageOutcome::Partial {
                failure: PartialFailure::GuestInvite,
                error,
            },
        }
    }

    async fn send_notification_email(&self, ctx: &mut PipelineContext) -> StageOutcome {
        let channel = match ctx.channel_for(Stage::SendNotificationEmail) {
            Ok(c) => c,
            Err(reason) => return StageOutcome::Abort(reason),
        };
        let mut params = TemplateParams::new();
        params.insert("company_name".into(), ctx.submission.company_name.clone());
        params.insert("channel_name".into(), channel.name.clone());
        params.insert("channel_id".into(), channel.id.clone());
        params.insert("submission_id".into(), ctx.submission_id.to_string());

        match self
            .notification
            .send_templated_email(&ctx.submission.email, &params)
            .await
        {
            Ok(receipt) => {
                debug!(message_id = %receipt.message_id, "notification email accepted");
                StageOutcome::Continue
            }
            Err(error) => StageOutcome::Partial {
                failure: PartialFailure::NotificationEmail,
                error,
            },
        }
    }
}
