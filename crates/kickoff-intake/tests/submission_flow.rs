// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end submission flows against mock collaborators.

use std::sync::Arc;

use kickoff_core::{Severity, UpstreamError};
use kickoff_intake::{FatalReason, IntakeSettings, Orchestrator, Outcome, PartialFailure};
use kickoff_limiter::{AdmissionLimiter, ManualClock, Quota};
use kickoff_test_utils::{MessagingCall, MockMessaging, MockNotification};
use tracing_test::traced_test;

const LOG_CHANNEL: &str = "C-log";

fn settings(group: Option<&str>) -> IntakeSettings {
    IntakeSettings {
        origin_quota: Quota::new(100, 3600),
        identity_quota: Quota::new(100, 86_400),
        group_id: group.map(String::from),
        log_channel: Some(LOG_CHANNEL.to_string()),
    }
}

fn build(
    messaging: MockMessaging,
    notification: MockNotification,
    group: Option<&str>,
) -> (
    Orchestrator<ManualClock>,
    Arc<MockMessaging>,
    Arc<MockNotification>,
) {
    let messaging = Arc::new(messaging);
    let notification = Arc::new(notification);
    let limiter = Arc::new(AdmissionLimiter::with_clock(ManualClock::new(1_000)));
    let orch = Orchestrator::new(
        messaging.clone(),
        notification.clone(),
        limiter,
        settings(group),
    );
    (orch, messaging, notification)
}

fn severities(posted: &[(String, String, Severity)]) -> Vec<Severity> {
    posted.iter().map(|(_, _, s)| *s).collect()
}

#[tokio::test]
async fn guest_invite_failure_is_reported_as_partial() {
    let (orch, messaging, notification) = build(
        MockMessaging::new()
            .failing_invite_guest(UpstreamError::rejected("not_allowed_token_type", "guests off")),
        MockNotification::new(),
        None,
    );

    let outcome = orch.submit("Acme Rockets", "founder@acme.test", "10.0.0.1").await;
    match outcome {
        Outcome::Succeeded {
            channel,
            partial_failures,
            ..
        } => {
            assert_eq!(channel.name, "acme-rockets");
            assert_eq!(partial_failures, vec![PartialFailure::GuestInvite]);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(notification.sent_count().await, 1);

    let posted = messaging.posted().await;
    assert_eq!(
        severities(&posted),
        vec![Severity::Info, Severity::Warn, Severity::Warn]
    );
    assert!(posted.iter().all(|(dest, _, _)| dest == LOG_CHANNEL));
    assert!(posted[0].1.contains("founder@acme.test"));
    assert!(posted[0].1.contains("acme-rockets"));
    assert!(posted[1].1.contains("guest-invite"));
    assert!(posted[1].1.contains("not_allowed_token_type"));
}

#[tokio::test]
async fn fourth_name_wins_after_three_collisions() {
    let (orch, messaging, _) = build(
        MockMessaging::new().with_name_taken(3),
        MockNotification::new(),
        None,
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    match outcome {
        Outcome::Succeeded {
            channel,
            partial_failures,
            ..
        } => {
            assert_eq!(channel.name, "acme-4");
            assert!(partial_failures.is_empty());
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(
        messaging.create_attempts().await,
        vec!["acme", "acme-2", "acme-3", "acme-4"]
    );
}

#[tokio::test]
async fn collision_exhaustion_is_fatal() {
    let (orch, messaging, notification) = build(
        MockMessaging::new().with_name_taken(10),
        MockNotification::new(),
        None,
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    match outcome {
        Outcome::FailedUpstream { reason, .. } => {
            assert_eq!(reason, FatalReason::CollisionRetriesExhausted { attempts: 10 });
            assert!(reason.to_string().contains("exhausted collision retries"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!messaging.invited_anyone().await);
    assert_eq!(notification.sent_count().await, 0);
    assert_eq!(
        severities(&messaging.posted().await),
        vec![Severity::Info, Severity::Error]
    );
}

#[tokio::test]
async fn every_non_critical_failure_together_still_succeeds() {
    let (orch, messaging, _) = build(
        MockMessaging::new()
            .with_group_members(vec!["U1".into(), "U2".into()])
            .failing_invite_users(UpstreamError::transport("connection reset"))
            .failing_invite_guest(UpstreamError::rejected("not_allowed", "")),
        MockNotification::new().failing(UpstreamError::unacknowledged("no messageId")),
        Some("S-team"),
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    match outcome {
        Outcome::Succeeded {
            partial_failures, ..
        } => assert_eq!(
            partial_failures,
            vec![
                PartialFailure::GroupInvite,
                PartialFailure::GuestInvite,
                PartialFailure::NotificationEmail,
            ]
        ),
        other => panic!("expected success, got {other:?}"),
    }

    let posted = messaging.posted().await;
    assert_eq!(
        severities(&posted),
        vec![
            Severity::Info,
            Severity::Warn,
            Severity::Warn,
            Severity::Warn,
            Severity::Warn,
        ]
    );
    assert!(posted[4].1.contains("group-invite, guest-invite, notification-email"));
}

#[tokio::test]
async fn non_collision_create_error_short_circuits() {
    let (orch, messaging, notification) = build(
        MockMessaging::new()
            .with_group_members(vec!["U1".into()])
            .with_create_result(Err(UpstreamError::rate_limited(None))),
        MockNotification::new(),
        Some("S-team"),
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    assert!(matches!(
        outcome,
        Outcome::FailedUpstream {
            reason: FatalReason::ChannelCreation(_),
            ..
        }
    ));

    let calls = messaging.calls().await;
    assert_eq!(
        calls
            .iter()
            .filter(|c| !matches!(c, MessagingCall::PostMessage { .. }))
            .count(),
        1
    );
    assert!(!messaging.invited_anyone().await);
    assert_eq!(notification.sent_count().await, 0);
}

#[tokio::test]
async fn membership_fetch_failure_is_fatal() {
    let (orch, messaging, notification) = build(
        MockMessaging::new().failing_group_members(UpstreamError::rejected("no_such_subteam", "")),
        MockNotification::new(),
        Some("S-missing"),
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    assert!(matches!(
        outcome,
        Outcome::FailedUpstream {
            reason: FatalReason::GroupMembers(_),
            ..
        }
    ));
    assert!(!messaging.invited_anyone().await);
    assert_eq!(notification.sent_count().await, 0);
}

#[tokio::test]
async fn failing_log_channel_does_not_change_outcome() {
    let (orch, messaging, _) = build(
        MockMessaging::new().failing_post_message(UpstreamError::transport("log channel down")),
        MockNotification::new(),
        None,
    );

    let outcome = orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;
    match outcome {
        Outcome::Succeeded {
            partial_failures, ..
        } => assert!(partial_failures.is_empty()),
        other => panic!("expected success, got {other:?}"),
    }
    // start + summary, one attempt each
    assert_eq!(messaging.posted().await.len(), 2);
}

#[tokio::test]
async fn validation_errors_never_reach_the_log_channel() {
    let (orch, messaging, _) = build(MockMessaging::new(), MockNotification::new(), None);

    let outcome = orch.submit("🚀", "not-an-email", "10.0.0.1").await;
    match outcome {
        Outcome::RejectedValidation { errors } => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(messaging.calls().await.is_empty());
}

#[tokio::test]
#[traced_test]
async fn outcome_events_are_traced() {
    let (orch, _, _) = build(
        MockMessaging::new().failing_invite_guest(UpstreamError::rejected("not_allowed", "")),
        MockNotification::new(),
        None,
    );

    orch.submit("Acme", "founder@acme.test", "10.0.0.1").await;

    assert!(logs_contain("requested a channel for Acme"));
    assert!(logs_contain("guest-invite failed"));
    assert!(logs_contain("completed with partial failures"));
}
