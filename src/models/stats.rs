use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Statistics Snapshot
///
/// Point-in-time view of the service counters and gauges. Counters are
/// monotonically increasing since process start; gauges (`cache_size`, list
/// sizes) reflect the live state at read time. Readers never block writers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StatsSnapshot {
    pub disposable_domains_count: u64,
    pub whitelist_domains_count: u64,
    /// Live (unexpired) verdict cache entries.
    pub cache_size: u64,
    pub cache_ttl_seconds: u64,
    pub uptime_seconds: u64,
    /// Addresses classified, single and bulk combined.
    pub emails_checked: u64,
    pub bulk_batches: u64,
    pub cache_hits: u64,
    /// DNS lookups actually performed (cache misses at the resolution layer).
    pub resolution_lookups: u64,
    /// RFC 3339 timestamp of process start.
    pub started_at: String,
}
