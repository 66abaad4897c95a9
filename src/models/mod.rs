/// # Classification Verdict Models
///
/// Core wire types produced by the email checker:
/// - `Verdict`: the full classification result for one address
/// - `RiskLevel`: four-tier risk banding derived from the numeric score
/// - `DomainChecks`: per-signal breakdown (blacklist, whitelist, MX)
/// - `BulkEntry` / `BulkSummary` / `BulkReport`: batch results and counts
///
/// ## Serialization
/// All types serialize to the JSON shapes served by the REST API and are
/// annotated with `ToSchema` for the OpenAPI document.
pub mod verdict;

/// # Health Report Models
///
/// Service health payload: an overall status plus a named map of component
/// checks (`domain_lists`, `resolver`, `cache`, `engine`), each carrying its
/// own status and a human-readable message.
pub mod health;

/// # Statistics Snapshot Model
///
/// Point-in-time counters and gauges: list sizes, cache occupancy, request
/// counters and uptime. Produced by the checker engine, read-only for callers.
pub mod stats;

pub use health::{HealthCheck, HealthReport};
pub use stats::StatsSnapshot;
pub use verdict::{
    BulkEntry, BulkReport, BulkSummary, DomainChecks, ErrorEntry, RiskDistribution, RiskLevel,
    Verdict,
};
