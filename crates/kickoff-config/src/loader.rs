// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Lookup order: `./kickoff.toml` > `~/.config/kickoff/kickoff.toml` >
//! `/etc/kickoff/kickoff.toml`, with `KICKOFF_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KickoffConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/kickoff/kickoff.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "kickoff.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kickoff").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kickoff/kickoff.toml`
/// 3. `~/.config/kickoff/kickoff.toml`
/// 4. `./kickoff.toml`
/// 5. `KICKOFF_*` environment variables
pub fn load_config() -> Result<KickoffConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<KickoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KickoffConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KickoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KickoffConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full Figment before extraction, for callers that need provenance metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KickoffConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `KICKOFF_*` env provider with an explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `KICKOFF_SLACK_BOT_TOKEN` must become `slack.bot_token`.
fn env_provider() -> Env {
    Env::prefixed("KICKOFF_").map(|key| {
        key.as_str()
            .replacen("server_", "server.", 1)
            .replacen("slack_", "slack.", 1)
            .replacen("email_", "email.", 1)
            .replacen("limits_", "limits.", 1)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[slack]
bot_token = "xoxb-from-file"
group_id = "S01"
"#,
            )?;
            jail.set_env("KICKOFF_SLACK_BOT_TOKEN", "xoxb-from-env");
            jail.set_env("KICKOFF_LIMITS_ORIGIN_LIMIT", "9");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.slack.bot_token.as_deref(), Some("xoxb-from-env"));
            assert_eq!(config.slack.group_id.as_deref(), Some("S01"));
            assert_eq!(config.limits.origin_limit, 9);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[server]
port = 9090
"#,
            )?;
            let config = load_config()?;
            assert_eq!(config.server.port, 9090);
            Ok(())
        });
    }
}
