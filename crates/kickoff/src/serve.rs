// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kickoff serve` implementation.
//!
//! Builds the collaborator clients, the shared limiter and the orchestrator,
//! then runs the gateway until SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use kickoff_config::model::KickoffConfig;
use kickoff_core::{HealthStatus, KickoffError, PluginAdapter};
use kickoff_email::TemplateMailer;
use kickoff_gateway::{GatewayState, HealthState, ServerConfig};
use kickoff_intake::{IntakeSettings, Orchestrator};
use kickoff_limiter::AdmissionLimiter;
use kickoff_slack::SlackMessaging;
use tracing::{info, warn};

use crate::shutdown::install_signal_handler;
use crate::sweep::{join_sweeper, spawn_sweeper};

/// Runs the intake server until a shutdown signal arrives.
pub async fn run_serve(config: KickoffConfig) -> Result<(), KickoffError> {
    init_tracing(&config.server.log_level);

    info!("starting kickoff serve");
    for warning in kickoff_config::validation::config_warnings(&config) {
        warn!("{warning}");
    }

    let messaging = Arc::new(SlackMessaging::from_config(&config.slack)?);
    let notification = Arc::new(TemplateMailer::from_config(&config.email)?);

    // Startup diagnostics only; an unhealthy provider does not stop the server.
    report_health(messaging.as_ref()).await;
    report_health(notification.as_ref()).await;

    let settings = IntakeSettings::from_config(&config);
    if settings.group_id.is_none() {
        info!("slack.group_id not set, channels will only get the guest invite");
    }
    if settings.log_channel.is_none() {
        info!("slack.log_channel not set, outcome logs go to tracing only");
    }

    let limiter = Arc::new(AdmissionLimiter::new());
    let orchestrator = Arc::new(Orchestrator::new(
        messaging,
        notification,
        limiter.clone(),
        settings,
    ));

    let shutdown = install_signal_handler();
    let sweeper = spawn_sweeper(
        limiter,
        Duration::from_secs(config.limits.sweep_interval_secs),
        shutdown.clone(),
    );

    let state = GatewayState {
        orchestrator,
        trust_forwarded_for: config.server.trust_forwarded_for,
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let result = kickoff_gateway::start_server(&server_config, state, shutdown.clone()).await;

    shutdown.cancel();
    if let Some(handle) = sweeper {
        join_sweeper(handle).await;
    }
    info!("kickoff serve stopped");
    result
}

async fn report_health(adapter: &dyn PluginAdapter) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => info!(adapter = adapter.name(), "adapter healthy"),
        Ok(HealthStatus::Degraded(reason)) | Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(adapter = adapter.name(), %reason, "adapter not healthy at startup");
        }
        Err(e) => warn!(adapter = adapter.name(), error = %e, "adapter health check failed"),
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins when set; otherwise kickoff crates log at `log_level` and
/// everything else at warn.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kickoff={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
