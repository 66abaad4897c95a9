use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Risk Level
///
/// Four-tier banding of the numeric risk score:
///
/// | Score | Level |
/// |---|---|
/// | 90..=100 | `critical` |
/// | 70..=89 | `high` |
/// | 40..=69 | `medium` |
/// | 0..=39 | `low` |
///
/// Serializes as a lowercase string (`"low"`, `"medium"`, `"high"`,
/// `"critical"`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Maps a 0..=100 risk score onto its band.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => RiskLevel::Critical,
            70..=89 => RiskLevel::High,
            40..=69 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Per-signal breakdown included in every verdict.
///
/// `mx_record_exists` is tri-state: `Some(true)` when the domain resolved,
/// `Some(false)` when DNS authoritatively returned no mail or address records,
/// and `None` (JSON `null`) when the check timed out, failed transiently, or
/// was skipped (invalid format, whitelisted domain).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct DomainChecks {
    pub domain_blacklist: bool,
    pub domain_whitelist: bool,
    pub mx_record_exists: Option<bool>,
}

/// # Classification Verdict
///
/// The complete result of checking a single email address. Always produced,
/// even for malformed input: a syntactically invalid address yields a verdict
/// with `is_valid_format: false` and the maximum risk score rather than an
/// error.
///
/// ## Example JSON
/// ```json
/// {
///   "email": "user@mailinator.com",
///   "domain": "mailinator.com",
///   "is_valid_format": true,
///   "is_disposable": true,
///   "risk_score": 85,
///   "risk_level": "high",
///   "checks": {
///     "domain_blacklist": true,
///     "domain_whitelist": false,
///     "mx_record_exists": true
///   },
///   "checked_at": "2025-06-14T08:21:07.412Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Verdict {
    /// Normalized (trimmed, lowercased) address as classified.
    pub email: String,
    /// Domain part, or `null` when the format is invalid.
    pub domain: Option<String>,
    pub is_valid_format: bool,
    /// True iff the domain is on the disposable blacklist.
    pub is_disposable: bool,
    /// 0..=100, higher is riskier.
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub checks: DomainChecks,
    /// RFC 3339 timestamp of classification.
    pub checked_at: String,
}

impl Verdict {
    /// Verdict for input that failed format validation. No domain signals are
    /// consulted for these.
    pub fn invalid_format(email: String) -> Self {
        Self {
            email,
            domain: None,
            is_valid_format: false,
            is_disposable: false,
            risk_score: 100,
            risk_level: RiskLevel::Critical,
            checks: DomainChecks::default(),
            checked_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Bulk-only entry for an address whose check failed internally (for example
/// a panicked worker task). Never produced by format problems, which yield a
/// regular invalid-format [`Verdict`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ErrorEntry {
    pub email: String,
    pub error: String,
}

/// One slot of a bulk result: either a verdict or an isolated per-entry error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum BulkEntry {
    Verdict(Verdict),
    Error(ErrorEntry),
}

impl BulkEntry {
    pub fn as_verdict(&self) -> Option<&Verdict> {
        match self {
            BulkEntry::Verdict(v) => Some(v),
            BulkEntry::Error(_) => None,
        }
    }
}

/// Count of verdicts per risk level within one batch.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct RiskDistribution {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

impl RiskDistribution {
    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// # Bulk Summary
///
/// Aggregate counts over one batch. Each entry lands in exactly one bucket:
/// `error_count` for internal failures, `invalid_count` for bad format,
/// `disposable_count` for blacklisted domains, `valid_count` for the rest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct BulkSummary {
    pub total_checked: u64,
    pub valid_count: u64,
    pub disposable_count: u64,
    pub invalid_count: u64,
    pub error_count: u64,
    pub risk_distribution: RiskDistribution,
    pub processing_time_ms: u64,
}

impl BulkSummary {
    /// Tallies a finished batch.
    pub fn tally(results: &[BulkEntry], processing_time_ms: u64) -> Self {
        let mut summary = BulkSummary {
            total_checked: results.len() as u64,
            valid_count: 0,
            disposable_count: 0,
            invalid_count: 0,
            error_count: 0,
            risk_distribution: RiskDistribution::default(),
            processing_time_ms,
        };

        for entry in results {
            match entry {
                BulkEntry::Error(_) => summary.error_count += 1,
                BulkEntry::Verdict(v) => {
                    summary.risk_distribution.record(v.risk_level);
                    if !v.is_valid_format {
                        summary.invalid_count += 1;
                    } else if v.is_disposable {
                        summary.disposable_count += 1;
                    } else {
                        summary.valid_count += 1;
                    }
                }
            }
        }

        summary
    }
}

/// Full bulk response: per-entry results in input order plus the summary.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct BulkReport {
    pub results: Vec<BulkEntry>,
    pub summary: BulkSummary,
}
