use chrono::Utc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Instant;

/// # Statistics Collector
///
/// Increment-only counters shared across the checker. Writers use relaxed
/// atomic adds and never block; readers take point-in-time loads. Only the
/// checker engine records events here, everything else is a reader.
#[derive(Debug)]
pub struct StatsCollector {
    started: Instant,
    started_at: String,
    emails_checked: AtomicU64,
    bulk_batches: AtomicU64,
    cache_hits: AtomicU64,
    resolution_lookups: AtomicU64,
    // Unix seconds, 0 = never
    last_lookup_at: AtomicI64,
    last_lookup_success_at: AtomicI64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now().to_rfc3339(),
            emails_checked: AtomicU64::new(0),
            bulk_batches: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            resolution_lookups: AtomicU64::new(0),
            last_lookup_at: AtomicI64::new(0),
            last_lookup_success_at: AtomicI64::new(0),
        }
    }

    pub fn record_email_checked(&self) {
        self.emails_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bulk_batch(&self) {
        self.bulk_batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one DNS lookup. `definitive` means the resolver produced an
    /// authoritative yes/no rather than a timeout or transient failure.
    pub fn record_resolution_lookup(&self, definitive: bool) {
        self.resolution_lookups.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now().timestamp();
        self.last_lookup_at.store(now, Ordering::Relaxed);
        if definitive {
            self.last_lookup_success_at.store(now, Ordering::Relaxed);
        }
    }

    pub fn emails_checked(&self) -> u64 {
        self.emails_checked.load(Ordering::Relaxed)
    }

    pub fn bulk_batches(&self) -> u64 {
        self.bulk_batches.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn resolution_lookups(&self) -> u64 {
        self.resolution_lookups.load(Ordering::Relaxed)
    }

    /// Seconds since the most recent lookup attempt, `None` if none happened.
    pub fn seconds_since_last_lookup(&self) -> Option<i64> {
        match self.last_lookup_at.load(Ordering::Relaxed) {
            0 => None,
            at => Some((Utc::now().timestamp() - at).max(0)),
        }
    }

    /// Seconds since the most recent definitive lookup answer.
    pub fn seconds_since_last_success(&self) -> Option<i64> {
        match self.last_lookup_success_at.load(Ordering::Relaxed) {
            0 => None,
            at => Some((Utc::now().timestamp() - at).max(0)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
