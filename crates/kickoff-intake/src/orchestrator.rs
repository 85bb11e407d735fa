// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one submission from raw input to an [`Outcome`].

use std::sync::Arc;

use kickoff_config::model::KickoffConfig;
use kickoff_core::{MessagingAdapter, NotificationAdapter, Severity};
use kickoff_limiter::{
    Admission, AdmissionLimiter, Clock, Namespace, Quota, SystemClock, admission_key,
};
use tracing::debug;
use uuid::Uuid;

use crate::outcome::Outcome;
use crate::outcome_log::OutcomeLog;
use crate::pipeline::{Pipeline, PipelineContext};
use crate::validation::{self, Preview};

/// Quotas and destinations used by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSettings {
    /// Per caller address.
    pub origin_quota: Quota,
    /// Per claimed email address.
    pub identity_quota: Quota,
    /// User group invited to every new channel.
    pub group_id: Option<String>,
    /// Channel receiving outcome logs.
    pub log_channel: Option<String>,
}

impl IntakeSettings {
    pub fn from_config(config: &KickoffConfig) -> Self {
        Self {
            origin_quota: Quota::new(config.limits.origin_limit, config.limits.origin_window_secs),
            identity_quota: Quota::new(
                config.limits.identity_limit,
                config.limits.identity_window_secs,
            ),
            group_id: config.slack.group_id.clone(),
            log_channel: config.slack.log_channel.clone(),
        }
    }
}

/// Validates, admits and runs submissions.
///
/// Cheap to share behind an `Arc`; every submission runs as its own
/// sequential task against the shared limiter.
pub struct Orchestrator<C = SystemClock> {
    limiter: Arc<AdmissionLimiter<C>>,
    pipeline: Pipeline,
    log: OutcomeLog,
    settings: IntakeSettings,
}

impl<C: Clock> Orchestrator<C> {
    pub fn new(
        messaging: Arc<dyn MessagingAdapter>,
        notification: Arc<dyn NotificationAdapter>,
        limiter: Arc<AdmissionLimiter<C>>,
        settings: IntakeSettings,
    ) -> Self {
        let log = OutcomeLog::new(messaging.clone(), settings.log_channel.clone());
        let pipeline = Pipeline::new(
            messaging,
            notification,
            settings.group_id.clone(),
            log.clone(),
        );
        Self {
            limiter,
            pipeline,
            log,
            settings,
        }
    }

    /// The shared limiter, for sweeping and inspection.
    pub fn limiter(&self) -> &Arc<AdmissionLimiter<C>> {
        &self.limiter
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    /// Process one submission.
    ///
    /// Origin admission is charged before validation, identity admission
    /// after it. Both happen before any collaborator call.
    pub async fn submit(&self, company_name: &str, email: &str, source_address: &str) -> Outcome {
        if let Some(limited) = self.admit_origin(source_address) {
            return limited;
        }

        let submission = match validation::validate(company_name, email) {
            Ok(s) => s,
            Err(errors) => {
                debug!(error_count = errors.len(), "submission rejected by validation");
                return Outcome::RejectedValidation { errors };
            }
        };

        let identity = self.limiter.admit(
            &admission_key(Namespace::Identity, &submission.email),
            self.settings.identity_quota,
        );
        if !identity.allowed {
            return self.rate_limited(Namespace::Identity, identity);
        }

        let submission_id = Uuid::new_v4();
        self.log
            .emit(
                Severity::Info,
                &format!(
                    "Submission {submission_id}: {} requested a channel for {} ({})",
                    submission.email, submission.company_name, submission.identifier
                ),
            )
            .await;

        let mut ctx = PipelineContext::new(submission_id, submission);
        match self.pipeline.run(&mut ctx).await {
            Ok(channel) => {
                let (severity, text) = if ctx.partial_failures.is_empty() {
                    (
                        Severity::Info,
                        format!(
                            "Submission {submission_id} completed: channel {} ({})",
                            channel.name, channel.id
                        ),
                    )
                } else {
                    let steps: Vec<String> =
                        ctx.partial_failures.iter().map(ToString::to_string).collect();
                    (
                        Severity::Warn,
                        format!(
                            "Submission {submission_id} completed with partial failures: channel {} ({}), failed steps: {}",
                            channel.name,
                            channel.id,
                            steps.join(", ")
                        ),
                    )
                };
                self.log.emit(severity, &text).await;
                Outcome::Succeeded {
                    submission_id,
                    channel,
                    partial_failures: ctx.partial_failures,
                }
            }
            Err(reason) => {
                self.log
                    .emit(
                        Severity::Error,
                        &format!(
                            "Submission {submission_id} failed for {} ({}): {reason}",
                            ctx.submission.email, ctx.submission.identifier
                        ),
                    )
                    .await;
                Outcome::FailedUpstream {
                    submission_id,
                    reason,
                }
            }
        }
    }

    /// Reject a request whose body could not be parsed.
    ///
    /// The origin quota is still charged, so unparseable floods are limited
    /// like any other submission.
    pub fn reject_malformed(&self, source_address: &str, detail: String) -> Outcome {
        if let Some(limited) = self.admit_origin(source_address) {
            return limited;
        }
        debug!("submission rejected: malformed body");
        Outcome::RejectedValidation {
            errors: vec![detail],
        }
    }

    /// Sanitize a company name for display. Never touches the limiter.
    pub fn preview(&self, company_name: &str) -> Preview {
        validation::preview(company_name)
    }

    fn admit_origin(&self, source_address: &str) -> Option<Outcome> {
        let origin = self.limiter.admit(
            &admission_key(Namespace::Origin, source_address),
            self.settings.origin_quota,
        );
        (!origin.allowed).then(|| self.rate_limited(Namespace::Origin, origin))
    }

    fn rate_limited(&self, namespace: Namespace, admission: Admission) -> Outcome {
        debug!(namespace = %namespace, reset_at = %admission.reset_at(), "submission rate limited");
        Outcome::RejectedRateLimit {
            namespace,
            remaining: admission.remaining,
            reset_at_ms: admission.reset_at_ms,
            retry_after_secs: admission.retry_after_secs(self.limiter.now_ms()),
        }
    }
}
