// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission orchestrator for the Kickoff intake service.
//!
//! A submission moves through origin admission, validation, identity
//! admission and then the external [`pipeline`]: create the channel, fetch the
//! group, invite the group, invite the guest, send the notification email.
//! Only the first two external steps are fatal. Outcome logging to the log
//! channel never affects the result.

pub mod orchestrator;
pub mod outcome;
pub mod outcome_log;
pub mod pipeline;
pub mod validation;

pub use orchestrator::{IntakeSettings, Orchestrator};
pub use outcome::{FatalReason, Outcome, PartialFailure};
pub use outcome_log::OutcomeLog;
pub use pipeline::{MAX_CREATE_ATTEMPTS, Pipeline, PipelineContext, Stage, StageOutcome};
pub use validation::{Preview, ValidSubmission, preview, validate};
