//! Per-caller request throttle.
//!
//! Every call for a token increments that token's counter; once the counter
//! passes `limit` further calls are refused with `remaining = 0`.
//!
//! Without an interval, counters live until the process restarts. With an
//! interval, a token's counter restarts once the interval has elapsed since
//! its window opened (fixed-window eviction).

use crate::clock::Clock;
use crate::config::ThrottleConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Result of one throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleDecision {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
}

/// Per-token counter.
#[derive(Debug, Clone)]
struct RateBucket {
    count: u32,
    window_start: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

pub struct RequestThrottle {
    buckets: Mutex<HashMap<String, RateBucket>>,
    interval: Option<Duration>,
    max_tracked_tokens: usize,
    clock: Arc<dyn Clock>,
}

impl RequestThrottle {
    const DEFAULT_MAX_TRACKED_TOKENS: usize = 500;

    /// Creates a throttle whose counters only reset on restart.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            interval: None,
            max_tracked_tokens: Self::DEFAULT_MAX_TRACKED_TOKENS,
            clock,
        }
    }

    pub fn from_config(config: &ThrottleConfig, clock: Arc<dyn Clock>) -> Self {
        let mut throttle = Self::new(clock).with_max_tracked_tokens(config.max_tracked_tokens);
        if let Some(secs) = config.interval_secs {
            throttle = throttle.with_interval(Duration::seconds(secs as i64));
        }
        throttle
    }

    /// Enables fixed-window eviction.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_max_tracked_tokens(mut self, max: usize) -> Self {
        self.max_tracked_tokens = max.max(1);
        self
    }

    /// Counts one operation for `token` against `limit`.
    pub fn check(&self, limit: u32, token: &str) -> ThrottleDecision {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());

        if !buckets.contains_key(token) && buckets.len() >= self.max_tracked_tokens {
            self.make_room(&mut buckets, now);
        }

        let bucket = buckets.entry(token.to_string()).or_insert(RateBucket {
            count: 0,
            window_start: now,
            last_seen: now,
        });

        if let Some(interval) = self.interval {
            if now - bucket.window_start >= interval {
                bucket.count = 0;
                bucket.window_start = now;
            }
        }

        bucket.count = bucket.count.saturating_add(1);
        bucket.last_seen = now;

        let success = bucket.count <= limit;
        let decision = ThrottleDecision {
            success,
            limit,
            remaining: if success { limit - bucket.count } else { 0 },
        };

        if !success {
            tracing::debug!("[Throttle] Token over budget (limit {})", limit);
        }
        decision
    }

    /// Number of tokens currently tracked.
    pub fn tracked_tokens(&self) -> usize {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Drops buckets whose window has fully elapsed. No-op without an interval.
    pub fn prune(&self) {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        self.prune_expired(&mut buckets, now);
    }

    fn prune_expired(&self, buckets: &mut HashMap<String, RateBucket>, now: DateTime<Utc>) {
        if let Some(interval) = self.interval {
            buckets.retain(|_, bucket| now - bucket.window_start < interval);
        }
    }

    fn make_room(&self, buckets: &mut HashMap<String, RateBucket>, now: DateTime<Utc>) {
        self.prune_expired(buckets, now);
        if buckets.len() < self.max_tracked_tokens {
            return;
        }
        let stalest = buckets
            .iter()
            .min_by_key(|(_, bucket)| bucket.last_seen)
            .map(|(token, _)| token.clone());
        if let Some(token) = stalest {
            buckets.remove(&token);
        }
    }
}
