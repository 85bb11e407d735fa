// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-level tests for the template mailer against a mock email API.

use std::time::Duration;

use kickoff_core::{NotificationAdapter, TemplateParams, UpstreamErrorKind};
use kickoff_email::TemplateMailer;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mailer(server: &MockServer) -> TemplateMailer {
    TemplateMailer::new("key-123", &server.uri(), 12, Duration::from_secs(5)).unwrap()
}

fn params() -> TemplateParams {
    let mut params = TemplateParams::new();
    params.insert("channel_name".into(), "acme".into());
    params
}

#[tokio::test]
async fn acknowledged_send_returns_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .and(header("api-key", "key-123"))
        .and(body_partial_json(json!({
            "templateId": 12,
            "to": [{"email": "founder@acme.test"}],
            "params": {"channel_name": "acme"}
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"messageId": "<abc@relay>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = mailer(&server)
        .send_templated_email("founder@acme.test", &params())
        .await
        .unwrap();
    assert_eq!(receipt.message_id, "<abc@relay>");
}

#[tokio::test]
async fn success_without_message_id_is_unacknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = mailer(&server)
        .send_templated_email("founder@acme.test", &params())
        .await
        .unwrap_err();
    assert_eq!(err.kind, UpstreamErrorKind::Unacknowledged);
}

#[tokio::test]
async fn empty_success_body_is_unacknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = mailer(&server)
        .send_templated_email("founder@acme.test", &params())
        .await
        .unwrap_err();
    assert_eq!(err.kind, UpstreamErrorKind::Unacknowledged);
}

#[tokio::test]
async fn api_error_body_supplies_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "invalid_parameter",
            "message": "templateId is not valid"
        })))
        .mount(&server)
        .await;

    let err = mailer(&server)
        .send_templated_email("founder@acme.test", &params())
        .await
        .unwrap_err();
    assert_eq!(err.kind, UpstreamErrorKind::Rejected);
    assert_eq!(err.code, "invalid_parameter");
}

#[tokio::test]
async fn throttling_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let err = mailer(&server)
        .send_templated_email("founder@acme.test", &params())
        .await
        .unwrap_err();
    assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
}
