// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the transactional email API.

use kickoff_core::TemplateParams;
use serde::{Deserialize, Serialize};

/// `POST /smtp/email` request using a stored template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEmailRequest<'a> {
    pub to: Vec<Recipient<'a>>,
    pub template_id: u64,
    pub params: &'a TemplateParams,
}

/// One `to` entry.
#[derive(Debug, Serialize)]
pub struct Recipient<'a> {
    pub email: &'a str,
}

/// Success body. `message_id` is the delivery acknowledgment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEmailResponse {
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    #[serde(default)]
    pub message: String,
}
