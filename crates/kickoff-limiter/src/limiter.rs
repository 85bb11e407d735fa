// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window admission counter.
//!
//! Each key owns one record: a count and the absolute time its window ends.
//! The window is fixed, not sliding. A caller can spend a full quota at the
//! tail of one window and another full quota at the head of the next, so the
//! short-term peak rate is up to twice the limit.
//!
//! Records live in a sharded [`DashMap`]. Check-then-increment runs under the
//! shard's write lock via the entry API, so `count` never passes `limit` even
//! when submissions are handled on several worker threads at once.

use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::clock::{Clock, SystemClock, duration_ms};

/// Stored state for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AdmissionRecord {
    count: u32,
    window_end_ms: u64,
}

/// Result of [`AdmissionLimiter::check_and_increment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Whether the submission may proceed.
    pub allowed: bool,
    /// Submissions left in the current window after this one.
    pub remaining: u32,
    /// Epoch milliseconds at which the window resets.
    pub reset_at_ms: u64,
}

impl Admission {
    /// `reset_at_ms` as a UTC timestamp.
    pub fn reset_at(&self) -> chrono::DateTime<chrono::Utc> {
        ms_to_datetime(self.reset_at_ms)
    }

    /// Time from `now_ms` until the window resets, rounded up to whole seconds.
    pub fn retry_after_secs(&self, now_ms: u64) -> u64 {
        self.reset_at_ms.saturating_sub(now_ms).div_ceil(1000)
    }
}

/// Read-only view returned by [`AdmissionLimiter::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionStatus {
    /// Submissions counted in the live window (0 when none is live).
    pub count: u32,
    /// Submissions still available in the live window.
    pub remaining: u32,
    /// End of the live window, if there is one.
    pub reset_at_ms: Option<u64>,
}

/// A limit and the window it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Submissions allowed per window. `0` denies everything.
    pub limit: u32,
    /// Window length.
    pub window: Duration,
}

impl Quota {
    /// Build a quota from a limit and a window in seconds.
    pub fn new(limit: u32, window_secs: u64) -> Self {
        Self {
            limit,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Process-local fixed-window limiter keyed by arbitrary strings.
///
/// State is lost on restart. Memory grows with the number of distinct keys
/// until [`sweep`](Self::sweep) is called; the limiter never sweeps on its own.
pub struct AdmissionLimiter<C = SystemClock> {
    records: DashMap<String, AdmissionRecord>,
    clock: C,
}

impl AdmissionLimiter<SystemClock> {
    /// Create a limiter on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for AdmissionLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AdmissionLimiter<C> {
    /// Create a limiter on an injected clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            records: DashMap::new(),
            clock,
        }
    }

    /// Current time according to the limiter's clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Count one submission against `key` and decide whether it is admitted.
    ///
    /// - `limit == 0`: always denied, nothing stored.
    /// - no record, or its window ended at or before now: a new window starts
    ///   with `count = 1`.
    /// - `count >= limit`: denied, record untouched.
    /// - otherwise `count` is incremented.
    pub fn check_and_increment(&self, key: &str, limit: u32, window: Duration) -> Admission {
        let now = self.clock.now_ms();
        let fresh_end = now.saturating_add(duration_ms(window));

        if limit == 0 {
            return Admission {
                allowed: false,
                remaining: 0,
                reset_at_ms: fresh_end,
            };
        }

        let fresh = AdmissionRecord {
            count: 1,
            window_end_ms: fresh_end,
        };
        let started = Admission {
            allowed: true,
            remaining: limit - 1,
            reset_at_ms: fresh_end,
        };

        match self.records.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(fresh);
                started
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if record.window_end_ms <= now {
                    *record = fresh;
                    started
                } else if record.count >= limit {
                    Admission {
                        allowed: false,
                        remaining: 0,
                        reset_at_ms: record.window_end_ms,
                    }
                } else {
                    record.count += 1;
                    Admission {
                        allowed: true,
                        remaining: limit - record.count,
                        reset_at_ms: record.window_end_ms,
                    }
                }
            }
        }
    }

    /// [`check_and_increment`](Self::check_and_increment) with a [`Quota`].
    pub fn admit(&self, key: &str, quota: Quota) -> Admission {
        self.check_and_increment(key, quota.limit, quota.window)
    }

    /// Inspect `key` without counting anything.
    pub fn status(&self, key: &str, limit: u32) -> AdmissionStatus {
        let now = self.clock.now_ms();
        match self.records.get(key) {
            Some(record) if record.window_end_ms > now => AdmissionStatus {
                count: record.count,
                remaining: limit.saturating_sub(record.count),
                reset_at_ms: Some(record.window_end_ms),
            },
            _ => AdmissionStatus {
                count: 0,
                remaining: limit,
                reset_at_ms: None,
            },
        }
    }

    /// Drop every record whose window has ended. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;
        self.records.retain(|_, record| {
            let live = record.window_end_ms > now;
            if !live {
                removed += 1;
            }
            live
        });
        debug!(removed, remaining = self.records.len(), "admission records swept");
        removed
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn ms_to_datetime(ms: u64) -> chrono::DateTime<chrono::Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC)
}
