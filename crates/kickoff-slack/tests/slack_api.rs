// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-level tests for the Slack adapter against a mock Web API.

use std::time::Duration;

use hyper_util::client::legacy::connect::HttpConnector;
use kickoff_core::{HealthStatus, MessagingAdapter, PluginAdapter, Severity, UpstreamErrorKind};
use kickoff_slack::SlackMessaging;
use serde_json::json;
use slack_morphism::prelude::SlackClientHyperConnector;
use wiremock::matchers::{body_partial_json, header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestSlack = SlackMessaging<SlackClientHyperConnector<HttpConnector>>;

fn slack(server: &MockServer) -> TestSlack {
    let connector = SlackClientHyperConnector::with_connector(HttpConnector::new())
        .with_slack_api_url(&server.uri());
    SlackMessaging::new(connector, "xoxb-test", Duration::from_secs(5))
}

fn channel_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "created": 1_700_000_000,
        "is_channel": true,
        "is_private": false
    })
}

#[tokio::test]
async fn create_channel_returns_id_and_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.create$"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(body_partial_json(json!({"name": "acme"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channel": channel_json("C123", "acme")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channel = slack(&server).create_channel("acme").await.unwrap();
    assert_eq!(channel.id, "C123");
    assert_eq!(channel.name, "acme");
}

#[tokio::test]
async fn create_channel_maps_name_taken() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.create$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "name_taken"})),
        )
        .mount(&server)
        .await;

    let err = slack(&server).create_channel("acme").await.unwrap_err();
    assert!(err.is_name_taken());
}

#[tokio::test]
async fn create_channel_maps_http_429_with_retry_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.create$"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_json(json!({"ok": false, "error": "ratelimited"})),
        )
        .mount(&server)
        .await;

    let err = slack(&server).create_channel("acme").await.unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::RateLimited { .. }));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn list_group_members_reads_users() {
    let server = MockServer::start().await;
    Mock::given(path_regex(r"/usergroups\.users\.list$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "users": ["U1", "U2"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let users = slack(&server).list_group_members("S0TEAM").await.unwrap();
    assert_eq!(users, vec!["U1", "U2"]);
}

#[tokio::test]
async fn invite_users_targets_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.invite$"))
        .and(body_partial_json(json!({"channel": "C1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channel": channel_json("C1", "acme")
        })))
        .expect(1)
        .mount(&server)
        .await;

    slack(&server)
        .invite_users("C1", &["U1".to_string(), "U2".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn invite_users_tolerates_already_in_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.invite$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "already_in_channel"})),
        )
        .mount(&server)
        .await;

    assert!(
        slack(&server)
            .invite_users("C1", &["U1".to_string()])
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn invite_external_guest_uses_invite_shared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.inviteShared$"))
        .and(body_partial_json(json!({
            "channel": "C1",
            "emails": ["guest@acme.test"],
            "external_limited": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "invite_id": "I1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    slack(&server)
        .invite_external_guest("guest@acme.test", "C1")
        .await
        .unwrap();
}

#[tokio::test]
async fn invite_external_guest_surfaces_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/conversations\.inviteShared$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "not_paid"})),
        )
        .mount(&server)
        .await;

    let err = slack(&server)
        .invite_external_guest("guest@acme.test", "C1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, UpstreamErrorKind::Rejected);
    assert_eq!(err.code, "not_paid");
}

#[tokio::test]
async fn post_message_prefixes_severity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/chat\.postMessage$"))
        .and(body_partial_json(json!({
            "channel": "C0LOGS",
            "text": ":warning: guest invite failed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channel": "C0LOGS",
            "ts": "1700000000.000100",
            "message": {
                "type": "message",
                "text": ":warning: guest invite failed",
                "ts": "1700000000.000100"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    slack(&server)
        .post_message("C0LOGS", "guest invite failed", Severity::Warn)
        .await
        .unwrap();
}

#[tokio::test]
async fn health_check_reflects_auth_test() {
    let server = MockServer::start().await;
    Mock::given(path_regex(r"/auth\.test$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_auth"})),
        )
        .mount(&server)
        .await;

    match slack(&server).health_check().await.unwrap() {
        HealthStatus::Unhealthy(msg) => assert!(msg.contains("invalid_auth")),
        other => panic!("expected Unhealthy, got {other:?}"),
    }
}
