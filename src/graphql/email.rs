use async_graphql::SimpleObject;

use crate::models;

/// GraphQL mirror of the classification verdict.
///
/// Field-for-field equivalent of the REST response; kept separate so the
/// GraphQL surface can evolve without touching the wire models.
#[derive(SimpleObject, Debug, Clone)]
pub struct EmailVerdict {
    /// Normalized (trimmed, lowercased) address as classified
    pub email: String,
    /// Domain part, absent when the format is invalid
    pub domain: Option<String>,
    pub is_valid_format: bool,
    /// True iff the domain is on the disposable blacklist
    pub is_disposable: bool,
    /// 0..=100, higher is riskier
    pub risk_score: u8,
    /// "low", "medium", "high" or "critical"
    pub risk_level: String,
    pub checks: CheckSignals,
    /// RFC 3339 timestamp of classification
    pub checked_at: String,
}

/// Per-signal breakdown behind a verdict.
#[derive(SimpleObject, Debug, Clone)]
pub struct CheckSignals {
    pub domain_blacklist: bool,
    pub domain_whitelist: bool,
    /// Absent when no authoritative DNS answer was obtained
    pub mx_record_exists: Option<bool>,
}

/// One slot of a bulk result. Exactly one of `verdict` and `error` is set.
#[derive(SimpleObject, Debug, Clone)]
pub struct BulkCheckEntry {
    pub email: String,
    pub verdict: Option<EmailVerdict>,
    /// Present when this entry failed internally
    pub error: Option<String>,
}

/// Verdict counts per risk level within one batch.
#[derive(SimpleObject, Debug, Clone)]
pub struct RiskBreakdown {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

/// Aggregate counts over one batch.
#[derive(SimpleObject, Debug, Clone)]
pub struct BulkCheckSummary {
    pub total_checked: u64,
    pub valid_count: u64,
    pub disposable_count: u64,
    pub invalid_count: u64,
    pub error_count: u64,
    pub risk_distribution: RiskBreakdown,
    pub processing_time_ms: u64,
}

/// Full bulk response: per-entry results in input order plus the summary.
#[derive(SimpleObject, Debug, Clone)]
pub struct BulkCheckReport {
    pub results: Vec<BulkCheckEntry>,
    pub summary: BulkCheckSummary,
}

impl From<models::DomainChecks> for CheckSignals {
    fn from(checks: models::DomainChecks) -> Self {
        Self {
            domain_blacklist: checks.domain_blacklist,
            domain_whitelist: checks.domain_whitelist,
            mx_record_exists: checks.mx_record_exists,
        }
    }
}

impl From<models::Verdict> for EmailVerdict {
    fn from(verdict: models::Verdict) -> Self {
        Self {
            email: verdict.email,
            domain: verdict.domain,
            is_valid_format: verdict.is_valid_format,
            is_disposable: verdict.is_disposable,
            risk_score: verdict.risk_score,
            risk_level: verdict.risk_level.as_str().to_string(),
            checks: verdict.checks.into(),
            checked_at: verdict.checked_at,
        }
    }
}

impl From<models::BulkEntry> for BulkCheckEntry {
    fn from(entry: models::BulkEntry) -> Self {
        match entry {
            models::BulkEntry::Verdict(verdict) => Self {
                email: verdict.email.clone(),
                verdict: Some(verdict.into()),
                error: None,
            },
            models::BulkEntry::Error(err) => Self {
                email: err.email,
                verdict: None,
                error: Some(err.error),
            },
        }
    }
}

impl From<models::RiskDistribution> for RiskBreakdown {
    fn from(distribution: models::RiskDistribution) -> Self {
        Self {
            low: distribution.low,
            medium: distribution.medium,
            high: distribution.high,
            critical: distribution.critical,
        }
    }
}

impl From<models::BulkSummary> for BulkCheckSummary {
    fn from(summary: models::BulkSummary) -> Self {
        Self {
            total_checked: summary.total_checked,
            valid_count: summary.valid_count,
            disposable_count: summary.disposable_count,
            invalid_count: summary.invalid_count,
            error_count: summary.error_count,
            risk_distribution: summary.risk_distribution.into(),
            processing_time_ms: summary.processing_time_ms,
        }
    }
}

impl From<models::BulkReport> for BulkCheckReport {
    fn from(report: models::BulkReport) -> Self {
        Self {
            results: report.results.into_iter().map(Into::into).collect(),
            summary: report.summary.into(),
        }
    }
}
