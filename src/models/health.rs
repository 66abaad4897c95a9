use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// # Health Report
///
/// Aggregated service health: an overall status plus one entry per component
/// check. The overall status is `"unhealthy"` exactly when at least one check
/// is unhealthy; checks in a `"warning"` state degrade the message but not
/// the status.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-06-14T08:21:07.412Z",
///   "checks": {
///     "domain_lists": { "status": "healthy", "message": "3454 disposable, 120 whitelisted" },
///     "resolver": { "status": "healthy", "message": "last successful lookup 4s ago" },
///     "cache": { "status": "healthy", "message": "212 of 10000 entries" },
///     "engine": { "status": "healthy", "message": "classification pipeline responsive" }
///   }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
    pub checks: BTreeMap<String, HealthCheck>,
}

/// Status of one named component check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct HealthCheck {
    /// "healthy", "warning" or "unhealthy"
    pub status: String,
    pub message: String,
}

impl HealthCheck {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: "warning".to_string(),
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: message.into(),
        }
    }

    pub fn is_unhealthy(&self) -> bool {
        self.status == "unhealthy"
    }
}

impl HealthReport {
    /// Builds a report from component checks, deriving the overall status.
    pub fn from_checks(checks: BTreeMap<String, HealthCheck>) -> Self {
        let status = if checks.values().any(HealthCheck::is_unhealthy) {
            "unhealthy"
        } else {
            "healthy"
        };
        Self {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            checks,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
