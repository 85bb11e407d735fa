// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every collaborator client implements.

use async_trait::async_trait;

use crate::error::KickoffError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Kickoff collaborator adapters.
///
/// Provides identity and health reporting used by the gateway's health
/// endpoint and by startup diagnostics.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the collaborator role this adapter fills.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, KickoffError>;
}
