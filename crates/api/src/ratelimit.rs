// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-window rate limiting for lead creation.
//!
//! State is a process-local map from key to the current window's counter.
//! Nothing survives a restart and nothing is shared across processes; for
//! a single-instance deployment that is the intended scope.

use num_traits::cast::ToPrimitive;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use time::Duration;

use leadbook_domain::TimestampMs;

/// Creates allowed per actor within one window.
pub const CREATE_LIMIT: u32 = 20;

/// Length of the creation window.
pub const CREATE_WINDOW: Duration = Duration::seconds(60);

/// Builds the rate-limit key for an actor's create operations.
#[must_use]
pub fn create_lead_key(actor_id: &str) -> String {
    format!("create:{actor_id}")
}

/// The outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The call may proceed.
    Allowed,
    /// The window is full; the caller must wait.
    Limited {
        /// When the key's window resets.
        reset_at: TimestampMs,
    },
}

/// One key's counter for the current window.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    reset_at: TimestampMs,
}

/// A fixed-window counter keyed by operation and actor.
///
/// Checking a key whose window has elapsed starts a fresh window with a
/// count of one. Within a window, each allowed call increments the count;
/// once the count reaches the limit further calls are denied until the
/// window resets. The check-and-increment runs under one lock, so
/// concurrent callers within the process cannot undercount.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    /// Creates a rate limiter.
    ///
    /// # Arguments
    ///
    /// * `limit` - Calls allowed per key within one window
    /// * `window` - Window length
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Checks and counts one call against a key.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, TimestampMs::now())
    }

    /// The clock-explicit check behind [`Self::check`].
    fn check_at(&self, key: &str, now: TimestampMs) -> RateDecision {
        // A poisoned lock still holds a usable map.
        let mut buckets: MutexGuard<'_, HashMap<String, Bucket>> = match self.buckets.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(bucket) = buckets.get_mut(key)
            && now.value() <= bucket.reset_at.value()
        {
            if bucket.count >= self.limit {
                return RateDecision::Limited {
                    reset_at: bucket.reset_at,
                };
            }
            bucket.count += 1;
            return RateDecision::Allowed;
        }

        let window_ms: i64 = self.window.whole_milliseconds().to_i64().unwrap_or(i64::MAX);
        buckets.insert(
            key.to_string(),
            Bucket {
                count: 1,
                reset_at: TimestampMs::new(now.value().saturating_add(window_ms)),
            },
        );
        RateDecision::Allowed
    }
}
