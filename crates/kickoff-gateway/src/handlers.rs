// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /api/submit, POST /api/sanitize, GET /health.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use kickoff_intake::{Outcome, PartialFailure, Preview};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;
use crate::source::SourceAddress;

/// Request body for POST /api/submit.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub email: String,
}

/// Response body for a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: String,
    pub channel_id: String,
    pub channel_name: String,
    /// Follow-up steps that did not complete.
    pub partial_failures: Vec<PartialFailure>,
}

/// Request body for POST /api/sanitize.
#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    #[serde(default)]
    pub company_name: String,
}

/// Response body for POST /api/sanitize.
#[derive(Debug, Serialize)]
pub struct SanitizeResponse {
    pub canonical_identifier: String,
}

/// Field-level validation errors.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<String>,
}

/// Body of a 429.
#[derive(Debug, Serialize)]
pub struct RateLimitResponse {
    pub error: String,
    /// `ip` or `email`.
    pub namespace: String,
    pub remaining: u32,
    /// RFC 3339 time at which the window resets.
    pub reset_at: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /api/submit
pub async fn post_submit(
    State(state): State<GatewayState>,
    SourceAddress(source): SourceAddress,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Response {
    let outcome = match body {
        Ok(Json(req)) => {
            state
                .orchestrator
                .submit(&req.company_name, &req.email, &source)
                .await
        }
        Err(rejection) => state
            .orchestrator
            .reject_malformed(&source, rejection.body_text()),
    };
    tracing::debug!(state = outcome.state(), "submission handled");
    outcome_response(outcome)
}

/// POST /api/sanitize
///
/// Never rate limited.
pub async fn post_sanitize(
    State(state): State<GatewayState>,
    body: Result<Json<SanitizeRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return validation_response(vec![rejection.body_text()]);
        }
    };
    match state.orchestrator.preview(&req.company_name) {
        Preview::Identifier(canonical_identifier) => (
            StatusCode::OK,
            Json(SanitizeResponse {
                canonical_identifier,
            }),
        )
            .into_response(),
        Preview::Invalid(errors) => validation_response(errors),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

fn validation_response(errors: Vec<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
}

/// Map an orchestrator outcome to its HTTP response.
///
/// Upstream failure detail stays in the logs; callers only see a generic error.
pub fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Succeeded {
            submission_id,
            channel,
            partial_failures,
        } => (
            StatusCode::CREATED,
            Json(SubmitResponse {
                submission_id: submission_id.to_string(),
                channel_id: channel.id,
                channel_name: channel.name,
                partial_failures,
            }),
        )
            .into_response(),
        Outcome::RejectedValidation { errors } => validation_response(errors),
        Outcome::RejectedRateLimit {
            namespace,
            remaining,
            reset_at_ms,
            retry_after_secs,
        } => {
            let reset_at = i64::try_from(reset_at_ms)
                .ok()
                .and_then(chrono::DateTime::from_timestamp_millis)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(RateLimitResponse {
                    error: "rate limit exceeded".to_string(),
                    namespace: namespace.to_string(),
                    remaining,
                    reset_at,
                }),
            )
                .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
            response
        }
        Outcome::FailedUpstream { .. } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "could not create channel".to_string(),
            }),
        )
            .into_response(),
    }
}
