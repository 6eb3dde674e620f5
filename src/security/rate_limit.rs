//! Fixed-window rate limiting keyed by client origin.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Per-origin counter for the current window.
#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    window_start: Instant,
    last_seen: Instant,
}

impl RateLimitRecord {
    fn new(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
            last_seen: now,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.duration_since(self.window_start) > window
    }
}

/// In-memory fixed-window rate limiter with a bounded record table.
///
/// A burst straddling a window boundary can admit up to twice the limit.
pub struct RateLimiter {
    records: Mutex<HashMap<String, RateLimitRecord>>,
    limit: u32,
    window: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            limit: config.limit,
            window: Duration::from_secs(config.window_secs),
            max_entries: config.max_entries.max(1),
            clock,
        }
    }

    /// Record an attempt from `origin`, returning whether it is allowed.
    ///
    /// Denied attempts leave the record untouched.
    pub fn check_and_record(&self, origin: &str) -> bool {
        let now = self.clock.now();
        let mut records = self.lock();

        if let Some(record) = records.get_mut(origin) {
            if record.is_expired(now, self.window) {
                *record = RateLimitRecord::new(now);
                return true;
            }
            if record.count < self.limit {
                record.count += 1;
                record.last_seen = now;
                return true;
            }
            return false;
        }

        if records.len() >= self.max_entries {
            self.make_room(&mut records, now);
        }
        records.insert(origin.to_string(), RateLimitRecord::new(now));
        metrics::record_rate_limit_entries(records.len());
        true
    }

    /// Number of attempts counted for `origin` in its current window.
    pub fn count(&self, origin: &str) -> Option<u32> {
        self.lock().get(origin).map(|r| r.count)
    }

    /// Number of tracked origins.
    pub fn tracked_origins(&self) -> usize {
        self.lock().len()
    }

    fn make_room(&self, records: &mut HashMap<String, RateLimitRecord>, now: Instant) {
        let window = self.window;
        records.retain(|_, record| !record.is_expired(now, window));

        if records.len() >= self.max_entries {
            let oldest = records
                .iter()
                .min_by_key(|(_, record)| record.last_seen)
                .map(|(origin, _)| origin.clone());
            if let Some(origin) = oldest {
                tracing::debug!(origin = %origin, "Evicting least recently seen rate limit record");
                records.remove(&origin);
            }
        }
    }

    // A poisoned table is still structurally valid; keep serving with it.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateLimitRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
