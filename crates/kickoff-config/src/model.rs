// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every section uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! rejected at startup instead of silently falling back to a default.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level Kickoff configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KickoffConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Messaging provider (Slack) settings.
    #[serde(default)]
    pub slack: SlackConfig,

    /// Notification provider (email) settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// Admission quotas.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Take the caller address from the first `X-Forwarded-For` hop.
    /// Only enable behind a proxy that sets the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            trust_forwarded_for: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Slack Web API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`). Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Web API base URL.
    #[serde(default = "default_slack_api_base_url")]
    pub api_base_url: String,

    /// User group whose members join every new channel. `None` skips the group invite.
    #[serde(default)]
    pub group_id: Option<String>,

    /// Channel that receives submission outcome logs. `None` keeps logs local.
    #[serde(default)]
    pub log_channel: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base_url: default_slack_api_base_url(),
            group_id: None,
            log_channel: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("group_id", &self.group_id)
            .field("log_channel", &self.log_channel)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_slack_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Transactional email API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// Provider API key. Required by `serve`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_email_api_base_url")]
    pub api_base_url: String,

    /// Provider-side template used for the welcome notification.
    #[serde(default = "default_template_id")]
    pub template_id: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_email_api_base_url(),
            template_id: default_template_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("template_id", &self.template_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_email_api_base_url() -> String {
    "https://api.brevo.com/v3".to_string()
}

fn default_template_id() -> u64 {
    1
}

/// Fixed-window admission quotas.
///
/// A limit of `0` blocks every submission in that namespace.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Submissions allowed per caller address per window.
    #[serde(default = "default_origin_limit")]
    pub origin_limit: u32,

    /// Window length for the caller-address quota.
    #[serde(default = "default_origin_window_secs")]
    pub origin_window_secs: u64,

    /// Submissions allowed per email address per window.
    #[serde(default = "default_identity_limit")]
    pub identity_limit: u32,

    /// Window length for the email quota.
    #[serde(default = "default_identity_window_secs")]
    pub identity_window_secs: u64,

    /// How often `serve` sweeps expired admission records. `0` disables sweeping.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            origin_limit: default_origin_limit(),
            origin_window_secs: default_origin_window_secs(),
            identity_limit: default_identity_limit(),
            identity_window_secs: default_identity_window_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_origin_limit() -> u32 {
    5
}

fn default_origin_window_secs() -> u64 {
    3600
}

fn default_identity_limit() -> u32 {
    3
}

fn default_identity_window_secs() -> u64 {
    86_400
}

fn default_sweep_interval_secs() -> u64 {
    300
}
