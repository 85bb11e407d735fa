// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Kickoff intake service.
//!
//! A thin axum layer over [`kickoff_intake::Orchestrator`]: it extracts the
//! caller address, parses JSON bodies, and maps each `Outcome` to a status
//! code. No submission logic lives here.

pub mod handlers;
pub mod server;
pub mod source;

pub use server::{GatewayState, HealthState, ServerConfig, router, start_server};
pub use source::SourceAddress;
