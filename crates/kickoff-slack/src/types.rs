// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bodies for Web API methods that slack-morphism does not model.

use serde::{Deserialize, Serialize};

/// `conversations.inviteShared` request.
#[derive(Debug, Serialize)]
pub struct InviteShared<'a> {
    pub channel: &'a str,
    pub emails: Vec<&'a str>,
    pub external_limited: bool,
}

/// `conversations.inviteShared` response.
#[derive(Debug, Deserialize)]
pub struct InviteSharedResponse {
    #[serde(default)]
    pub invite_id: Option<String>,
}
