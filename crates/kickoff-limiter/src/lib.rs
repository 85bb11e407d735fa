// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory admission control for submissions.
//!
//! One [`AdmissionLimiter`] instance is shared by all requests in the process
//! and passed explicitly to whoever needs it. Keys are namespaced with
//! [`admission_key`] so caller addresses and email addresses never share a
//! counter.

pub mod clock;
pub mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{Admission, AdmissionLimiter, AdmissionStatus, Quota};

use strum::{Display, EnumString};

/// Which quota a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Namespace {
    /// Caller network address.
    #[strum(serialize = "ip")]
    Origin,
    /// Claimed email address.
    #[strum(serialize = "email")]
    Identity,
}

/// Compose the limiter key `<namespace>:<value>`.
///
/// Identity values are trimmed and lowercased so `Bob@Example.com` and
/// `bob@example.com` draw from one quota.
pub fn admission_key(namespace: Namespace, value: &str) -> String {
    match namespace {
        Namespace::Origin => format!("{namespace}:{}", value.trim()),
        Namespace::Identity => format!("{namespace}:{}", value.trim().to_lowercase()),
    }
}
