use async_graphql::SimpleObject;

use crate::models;

/// One named component check within the health report.
#[derive(SimpleObject, Debug, Clone)]
pub struct ComponentHealth {
    pub name: String,
    /// "healthy", "warning" or "unhealthy"
    pub status: String,
    pub message: String,
}

/// GraphQL mirror of the service health report. The keyed map of the REST
/// response becomes a list of named checks, which queries can filter.
#[derive(SimpleObject, Debug, Clone)]
pub struct ServiceHealth {
    pub status: String,
    pub timestamp: String,
    pub checks: Vec<ComponentHealth>,
}

/// GraphQL mirror of the statistics snapshot.
#[derive(SimpleObject, Debug, Clone)]
pub struct ServiceStats {
    pub disposable_domains_count: u64,
    pub whitelist_domains_count: u64,
    pub cache_size: u64,
    pub cache_ttl_seconds: u64,
    pub uptime_seconds: u64,
    pub emails_checked: u64,
    pub bulk_batches: u64,
    pub cache_hits: u64,
    pub resolution_lookups: u64,
    pub started_at: String,
}

impl From<models::HealthReport> for ServiceHealth {
    fn from(report: models::HealthReport) -> Self {
        Self {
            status: report.status,
            timestamp: report.timestamp,
            checks: report
                .checks
                .into_iter()
                .map(|(name, check)| ComponentHealth {
                    name,
                    status: check.status,
                    message: check.message,
                })
                .collect(),
        }
    }
}

impl From<models::StatsSnapshot> for ServiceStats {
    fn from(snapshot: models::StatsSnapshot) -> Self {
        Self {
            disposable_domains_count: snapshot.disposable_domains_count,
            whitelist_domains_count: snapshot.whitelist_domains_count,
            cache_size: snapshot.cache_size,
            cache_ttl_seconds: snapshot.cache_ttl_seconds,
            uptime_seconds: snapshot.uptime_seconds,
            emails_checked: snapshot.emails_checked,
            bulk_batches: snapshot.bulk_batches,
            cache_hits: snapshot.cache_hits,
            resolution_lookups: snapshot.resolution_lookups,
            started_at: snapshot.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthCheck;
    use std::collections::BTreeMap;

    #[test]
    fn test_health_report_becomes_a_named_check_list() {
        let mut checks = BTreeMap::new();
        checks.insert("cache".to_string(), HealthCheck::healthy("3 entries"));
        checks.insert(
            "domain_lists".to_string(),
            HealthCheck::unhealthy("blacklist is empty"),
        );
        let report = models::HealthReport::from_checks(checks);

        let converted = ServiceHealth::from(report);

        assert_eq!(converted.status, "unhealthy");
        assert_eq!(converted.checks.len(), 2);
        // BTreeMap iteration keeps the list ordering stable
        assert_eq!(converted.checks[0].name, "cache");
        assert_eq!(converted.checks[1].name, "domain_lists");
        assert_eq!(converted.checks[1].status, "unhealthy");
    }
}
