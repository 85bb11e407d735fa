// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks constraints serde cannot express. All errors are collected; the
//! caller sees every problem at once.

use crate::diagnostic::ConfigError;
use crate::model::KickoffConfig;

/// Validate a deserialized configuration.
pub fn validate_config(config: &KickoffConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!(
            "server.host `{host}` is not a valid IP address or hostname"
        ));
    }

    for (key, url) in [
        ("slack.api_base_url", &config.slack.api_base_url),
        ("email.api_base_url", &config.email.api_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{key} must be an http(s) URL, got `{url}`"));
        }
    }

    for (key, value) in [
        ("slack.bot_token", &config.slack.bot_token),
        ("slack.group_id", &config.slack.group_id),
        ("slack.log_channel", &config.slack.log_channel),
        ("email.api_key", &config.email.api_key),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            fail(format!("{key} is set but empty; remove it to disable"));
        }
    }

    for (key, secs) in [
        ("slack.timeout_secs", config.slack.timeout_secs),
        ("email.timeout_secs", config.email.timeout_secs),
        ("limits.origin_window_secs", config.limits.origin_window_secs),
        ("limits.identity_window_secs", config.limits.identity_window_secs),
    ] {
        if secs == 0 {
            fail(format!("{key} must be at least 1"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings about a valid configuration.
///
/// Validation runs before the tracing subscriber exists, so callers log
/// these once it is installed.
pub fn config_warnings(config: &KickoffConfig) -> Vec<String> {
    [
        ("limits.origin_limit", config.limits.origin_limit),
        ("limits.identity_limit", config.limits.identity_limit),
    ]
    .into_iter()
    .filter(|(_, limit)| *limit == 0)
    .map(|(key, _)| format!("{key} is 0; every submission in that namespace is rejected"))
    .collect()
}
