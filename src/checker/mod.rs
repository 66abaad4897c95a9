//! # Email Checker Engine
//!
//! Classification pipeline for disposable email detection. A check runs
//! format validation, blacklist/whitelist membership, and a bounded DNS
//! resolvability probe, then folds the signals into a risk score. Results
//! are cached with single-flight semantics so concurrent checks of the
//! same address or domain share one computation.

pub mod cache;
pub mod fetch;
pub mod lists;
pub mod resolver;
pub mod scoring;
pub mod stats;
pub mod syntax;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio::time::Instant;

use crate::config::Config;
use crate::models::{
    BulkEntry, BulkReport, BulkSummary, DomainChecks, ErrorEntry, HealthCheck, HealthReport,
    RiskLevel, StatsSnapshot, Verdict,
};
use cache::ResultCache;
use lists::{DomainListStore, DomainPage, ListError, ListKind};
use resolver::{Resolve, ResolutionStatus};
use scoring::ScoreInputs;
use stats::StatsCollector;

/// Resolver recency beyond which the health report degrades to a warning.
const STALE_RESOLUTION_SECS: i64 = 600;

/// # Email Checker
///
/// The shared engine behind every endpoint. Cheap to clone; all state lives
/// in one inner allocation.
#[derive(Clone)]
pub struct EmailChecker {
    inner: Arc<CheckerInner>,
}

struct CheckerInner {
    lists: DomainListStore,
    resolver: Arc<dyn Resolve>,
    /// Full verdicts keyed by normalized email.
    verdicts: ResultCache<Verdict>,
    /// Resolvability keyed by domain, shared across addresses.
    resolutions: ResultCache<ResolutionStatus>,
    stats: StatsCollector,
    blacklist_sources: Vec<String>,
    cache_ttl_secs: u64,
    cache_max_entries: usize,
    bulk_concurrency: usize,
    bulk_deadline: Duration,
}

impl EmailChecker {
    pub fn new(config: &Config, lists: DomainListStore, resolver: Arc<dyn Resolve>) -> Self {
        Self {
            inner: Arc::new(CheckerInner {
                lists,
                resolver,
                verdicts: ResultCache::new(config.cache_ttl, config.cache_max_entries),
                resolutions: ResultCache::new(config.resolution_ttl, config.cache_max_entries),
                stats: StatsCollector::new(),
                blacklist_sources: config.blacklist_sources.clone(),
                cache_ttl_secs: config.cache_ttl.as_secs(),
                cache_max_entries: config.cache_max_entries,
                bulk_concurrency: config.bulk_concurrency.max(1),
                bulk_deadline: config.bulk_deadline,
            }),
        }
    }

    /// Classifies one address. Never fails: malformed input yields an
    /// invalid-format verdict, resolver trouble yields an unknown MX signal.
    pub async fn check(&self, raw: &str) -> Verdict {
        self.check_with_deadline(raw, None).await
    }

    async fn check_with_deadline(&self, raw: &str, deadline: Option<Instant>) -> Verdict {
        let normalized = syntax::normalize(raw);
        let (verdict, from_cache) = self
            .inner
            .verdicts
            .get_or_compute(&normalized, || self.classify(normalized.clone(), deadline))
            .await;

        self.inner.stats.record_email_checked();
        if from_cache {
            self.inner.stats.record_cache_hit();
        }
        verdict
    }

    /// The uncached pipeline. `email` must already be normalized.
    async fn classify(&self, email: String, deadline: Option<Instant>) -> Verdict {
        if !syntax::is_valid_email(&email) {
            debug!("invalid address format: {email}");
            return Verdict::invalid_format(email);
        }
        let domain = match syntax::domain_of(&email) {
            Some(domain) => domain.to_string(),
            None => return Verdict::invalid_format(email),
        };

        let sets = self.inner.lists.snapshot();
        let whitelisted = sets.is_whitelisted(&domain);
        let blacklisted = sets.is_blacklisted(&domain);

        // Whitelisted domains are trusted outright; no lookup is spent on them
        let resolution = if whitelisted {
            ResolutionStatus::Unknown
        } else {
            self.resolve_cached(&domain, deadline).await
        };

        let score = scoring::risk_score(ScoreInputs {
            format_valid: true,
            blacklisted,
            whitelisted,
            resolution,
        });

        Verdict {
            email,
            domain: Some(domain),
            is_valid_format: true,
            is_disposable: blacklisted && !whitelisted,
            risk_score: score,
            risk_level: RiskLevel::from_score(score),
            checks: DomainChecks {
                domain_blacklist: blacklisted,
                domain_whitelist: whitelisted,
                mx_record_exists: resolution.as_option_bool(),
            },
            checked_at: Utc::now().to_rfc3339(),
        }
    }

    /// Domain resolvability with per-domain memoization. Definitive answers
    /// stay for the resolution TTL; `Unknown` is dropped immediately so the
    /// next check retries instead of inheriting a transient failure.
    async fn resolve_cached(&self, domain: &str, deadline: Option<Instant>) -> ResolutionStatus {
        let inner = &self.inner;
        let (status, _) = inner
            .resolutions
            .get_or_compute(domain, || async move {
                let status = inner.resolver.resolve(domain, deadline).await;
                inner.stats.record_resolution_lookup(status.is_definitive());
                status
            })
            .await;

        if !status.is_definitive() {
            inner.resolutions.remove(domain);
        }
        status
    }

    /// Checks a batch concurrently and returns per-entry results in input
    /// order. Concurrency is bounded by the configured limit, the whole
    /// batch by one deadline; entries that cannot resolve before it report
    /// an unknown MX signal instead of blocking. A failed worker turns into
    /// an error entry without disturbing its neighbors.
    pub async fn check_bulk(&self, emails: &[String]) -> BulkReport {
        let started = std::time::Instant::now();
        self.inner.stats.record_bulk_batch();

        let deadline = Instant::now() + self.inner.bulk_deadline;
        let semaphore = Arc::new(Semaphore::new(self.inner.bulk_concurrency));

        let mut handles = Vec::with_capacity(emails.len());
        for email in emails {
            let checker = self.clone();
            let email = email.clone();
            let semaphore = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                checker.check_with_deadline(&email, Some(deadline)).await
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (email, handle) in emails.iter().zip(handles) {
            match handle.await {
                Ok(verdict) => results.push(BulkEntry::Verdict(verdict)),
                Err(err) => {
                    warn!("bulk worker for {email} failed: {err}");
                    results.push(BulkEntry::Error(ErrorEntry {
                        email: syntax::normalize(email),
                        error: "internal error while checking this address".to_string(),
                    }));
                }
            }
        }

        let summary = BulkSummary::tally(&results, started.elapsed().as_millis() as u64);
        BulkReport { results, summary }
    }

    pub fn stats(&self) -> StatsSnapshot {
        let inner = &self.inner;
        let (disposable, whitelisted) = inner.lists.counts();
        StatsSnapshot {
            disposable_domains_count: disposable as u64,
            whitelist_domains_count: whitelisted as u64,
            cache_size: inner.verdicts.len() as u64,
            cache_ttl_seconds: inner.cache_ttl_secs,
            uptime_seconds: inner.stats.uptime_seconds(),
            emails_checked: inner.stats.emails_checked(),
            bulk_batches: inner.stats.bulk_batches(),
            cache_hits: inner.stats.cache_hits(),
            resolution_lookups: inner.stats.resolution_lookups(),
            started_at: inner.stats.started_at().to_string(),
        }
    }

    /// Liveness report over the engine's parts. Runs entirely offline: the
    /// resolver check reads recency counters instead of probing DNS, and the
    /// pipeline check classifies a malformed probe that needs no lookup.
    pub async fn health(&self) -> HealthReport {
        let inner = &self.inner;
        let mut checks = BTreeMap::new();

        let (disposable, whitelisted) = inner.lists.counts();
        let lists_check = if disposable == 0 {
            HealthCheck::unhealthy("disposable blacklist is empty")
        } else {
            HealthCheck::healthy(format!(
                "{disposable} disposable, {whitelisted} whitelisted domains loaded"
            ))
        };
        checks.insert("domain_lists".to_string(), lists_check);

        let resolver_check = match (
            inner.stats.seconds_since_last_lookup(),
            inner.stats.seconds_since_last_success(),
        ) {
            (None, _) => HealthCheck::warning("no resolution attempted yet"),
            (Some(last), None) => HealthCheck::warning(format!(
                "no definitive answer yet, last attempt {last}s ago"
            )),
            (Some(last), Some(ok)) if ok > STALE_RESOLUTION_SECS && last < ok => {
                HealthCheck::warning(format!("last definitive answer {ok}s ago"))
            }
            (Some(_), Some(ok)) => {
                HealthCheck::healthy(format!("last definitive answer {ok}s ago"))
            }
        };
        checks.insert("resolver".to_string(), resolver_check);

        checks.insert(
            "cache".to_string(),
            HealthCheck::healthy(format!(
                "{} of {} entries in use",
                inner.verdicts.len(),
                inner.cache_max_entries
            )),
        );

        let probe = self.classify("health-probe".to_string(), None).await;
        let engine_check = if !probe.is_valid_format && probe.risk_level == RiskLevel::Critical {
            HealthCheck::healthy("classification pipeline responding")
        } else {
            HealthCheck::unhealthy("probe classification returned an unexpected verdict")
        };
        checks.insert("engine".to_string(), engine_check);

        HealthReport::from_checks(checks)
    }

    /// Fetches fresh blacklist data from the configured sources (when any
    /// are configured), then reloads both lists from disk and swaps them in.
    /// Cached verdicts are dropped since they may reflect the old lists;
    /// cached resolutions are domain facts and survive.
    pub async fn update_domains(&self) -> Result<(usize, usize), ListError> {
        let inner = &self.inner;
        if inner.blacklist_sources.is_empty() {
            debug!("no blacklist sources configured, reloading from disk only");
        } else {
            fetch::refresh_blacklist(&inner.blacklist_sources, inner.lists.blacklist_path())
                .await?;
        }

        let counts = inner.lists.reload()?;
        inner.verdicts.clear();
        Ok(counts)
    }

    /// Read-side view into the serving lists.
    pub fn domains(
        &self,
        kind: ListKind,
        search: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> DomainPage {
        self.inner.lists.domains(kind, search, offset, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::resolver::MockResolve;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_config() -> Config {
        Config {
            blacklist_sources: Vec::new(),
            bulk_concurrency: 4,
            ..Config::default()
        }
    }

    fn test_store() -> DomainListStore {
        DomainListStore::from_sets(
            &["mailinator.com", "tempmail.org", "shared.example"],
            &["gmail.com", "shared.example"],
        )
    }

    fn checker_with(resolver: MockResolve) -> EmailChecker {
        EmailChecker::new(&test_config(), test_store(), Arc::new(resolver))
    }

    fn resolver_returning(status: ResolutionStatus) -> MockResolve {
        let mut resolver = MockResolve::new();
        resolver.expect_resolve().returning(move |_, _| status);
        resolver
    }

    fn never_resolving() -> MockResolve {
        let mut resolver = MockResolve::new();
        resolver.expect_resolve().times(0);
        resolver
    }

    /// Counts calls; used where mockall's expectation style gets in the way
    /// of concurrency assertions.
    struct CountingResolver {
        calls: AtomicUsize,
        status: ResolutionStatus,
    }

    impl CountingResolver {
        fn new(status: ResolutionStatus) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                status,
            }
        }
    }

    #[async_trait]
    impl Resolve for CountingResolver {
        async fn resolve(&self, _domain: &str, _deadline: Option<Instant>) -> ResolutionStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.status
        }
    }

    #[tokio::test]
    async fn test_invalid_format_never_touches_resolver() {
        let checker = checker_with(never_resolving());

        let verdict = checker.check("definitely-not-an-email").await;

        assert!(!verdict.is_valid_format);
        assert!(!verdict.is_disposable);
        assert_eq!(verdict.domain, None);
        assert_eq!(verdict.risk_score, 100);
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert_eq!(verdict.checks.mx_record_exists, None);
    }

    #[tokio::test]
    async fn test_input_is_normalized_before_classification() {
        let checker = checker_with(never_resolving());

        let verdict = checker.check("  User@GMAIL.com  ").await;

        assert_eq!(verdict.email, "user@gmail.com");
        assert_eq!(verdict.domain.as_deref(), Some("gmail.com"));
        assert!(verdict.checks.domain_whitelist);
    }

    #[tokio::test]
    async fn test_whitelisted_domain_skips_resolution() {
        let checker = checker_with(never_resolving());

        let verdict = checker.check("user@gmail.com").await;

        assert!(verdict.is_valid_format);
        assert!(!verdict.is_disposable);
        assert_eq!(verdict.risk_score, 0);
        assert_eq!(verdict.risk_level, RiskLevel::Low);
        assert!(verdict.checks.domain_whitelist);
        assert_eq!(verdict.checks.mx_record_exists, None);
    }

    #[tokio::test]
    async fn test_whitelist_wins_over_blacklist() {
        let checker = checker_with(never_resolving());

        // shared.example sits on both lists
        let verdict = checker.check("user@shared.example").await;

        assert!(!verdict.is_disposable);
        assert_eq!(verdict.risk_score, 0);
        assert!(verdict.checks.domain_blacklist);
        assert!(verdict.checks.domain_whitelist);
    }

    #[tokio::test]
    async fn test_blacklisted_resolvable_domain_is_high_risk() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Resolvable));

        let verdict = checker.check("user@mailinator.com").await;

        assert!(verdict.is_disposable);
        assert_eq!(verdict.risk_score, 85);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert_eq!(verdict.checks.mx_record_exists, Some(true));
    }

    #[tokio::test]
    async fn test_blacklisted_unresolvable_domain_is_critical() {
        let checker = checker_with(resolver_returning(ResolutionStatus::NotResolvable));

        let verdict = checker.check("user@mailinator.com").await;

        assert!(verdict.is_disposable);
        assert_eq!(verdict.risk_score, 100);
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert_eq!(verdict.checks.mx_record_exists, Some(false));
    }

    #[tokio::test]
    async fn test_unlisted_domain_with_unknown_resolution_scores_midband() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Unknown));

        let verdict = checker.check("user@quiet-startup.example").await;

        assert!(!verdict.is_disposable);
        assert_eq!(verdict.risk_score, 50);
        assert_eq!(verdict.risk_level, RiskLevel::Medium);
        assert_eq!(verdict.checks.mx_record_exists, None);
    }

    #[tokio::test]
    async fn test_repeat_check_is_served_from_cache() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_, _| ResolutionStatus::Resolvable);
        let checker = checker_with(resolver);

        let first = checker.check("user@tempmail.org").await;
        let second = checker.check("user@tempmail.org").await;

        assert_eq!(first, second);
        let stats = checker.stats();
        assert_eq!(stats.emails_checked, 2);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.resolution_lookups, 1);
    }

    #[tokio::test]
    async fn test_resolution_is_shared_across_addresses_on_one_domain() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_, _| ResolutionStatus::Resolvable);
        let checker = checker_with(resolver);

        checker.check("alice@startup.example").await;
        checker.check("bob@startup.example").await;

        assert_eq!(checker.stats().resolution_lookups, 1);
    }

    #[tokio::test]
    async fn test_unknown_resolution_is_retried_not_retained() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .times(2)
            .returning(|_, _| ResolutionStatus::Unknown);
        let checker = checker_with(resolver);

        checker.check("alice@flaky.example").await;
        checker.check("bob@flaky.example").await;

        assert_eq!(checker.stats().resolution_lookups, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_checks_of_one_domain_share_a_lookup() {
        let resolver = Arc::new(CountingResolver::new(ResolutionStatus::Resolvable));
        let shared: Arc<dyn Resolve> = resolver.clone();
        let checker = EmailChecker::new(&test_config(), test_store(), shared);

        let mut handles = Vec::new();
        for i in 0..5 {
            let checker = checker.clone();
            handles.push(tokio::spawn(async move {
                checker.check(&format!("user{i}@busy.example")).await
            }));
        }
        for handle in handles {
            let verdict = handle.await.unwrap();
            assert_eq!(verdict.checks.mx_record_exists, Some(true));
        }

        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_check_carries_no_deadline() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .withf(|_, deadline| deadline.is_none())
            .returning(|_, _| ResolutionStatus::Resolvable);
        let checker = checker_with(resolver);

        checker.check("user@somewhere.example").await;
    }

    #[tokio::test]
    async fn test_bulk_passes_its_deadline_to_the_resolver() {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .withf(|_, deadline| deadline.is_some())
            .returning(|_, _| ResolutionStatus::Resolvable);
        let checker = checker_with(resolver);

        checker
            .check_bulk(&["user@somewhere.example".to_string()])
            .await;
    }

    #[tokio::test]
    async fn test_bulk_preserves_input_order() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Resolvable));

        let emails = vec![
            "zoe@tempmail.org".to_string(),
            "broken-address".to_string(),
            "amy@gmail.com".to_string(),
            "max@unlisted.example".to_string(),
        ];
        let report = checker.check_bulk(&emails).await;

        assert_eq!(report.results.len(), 4);
        let emails_out: Vec<&str> = report
            .results
            .iter()
            .map(|entry| entry.as_verdict().map(|v| v.email.as_str()).unwrap_or(""))
            .collect();
        assert_eq!(
            emails_out,
            vec![
                "zoe@tempmail.org",
                "broken-address",
                "amy@gmail.com",
                "max@unlisted.example"
            ]
        );
    }

    #[tokio::test]
    async fn test_bulk_summary_matches_verdicts() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Resolvable));

        let emails = vec![
            "user@mailinator.com".to_string(),
            "not-an-email".to_string(),
            "user@gmail.com".to_string(),
        ];
        let report = checker.check_bulk(&emails).await;

        let summary = &report.summary;
        assert_eq!(summary.total_checked, 3);
        assert_eq!(summary.disposable_count, 1);
        assert_eq!(summary.invalid_count, 1);
        assert_eq!(summary.valid_count, 1);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.risk_distribution.high, 1);
        assert_eq!(summary.risk_distribution.critical, 1);
        assert_eq!(summary.risk_distribution.low, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_duplicates_collapse_onto_one_computation() {
        let resolver = Arc::new(CountingResolver::new(ResolutionStatus::Resolvable));
        let shared: Arc<dyn Resolve> = resolver.clone();
        let checker = EmailChecker::new(&test_config(), test_store(), shared);

        let emails = vec!["user@dupe.example".to_string(); 3];
        let report = checker.check_bulk(&emails).await;

        assert_eq!(report.results.len(), 3);
        assert!(report
            .results
            .iter()
            .all(|entry| entry.as_verdict().is_some()));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_concurrency_stays_within_limit() {
        struct GaugeResolver {
            current: AtomicUsize,
            peak: AtomicUsize,
        }

        #[async_trait]
        impl Resolve for GaugeResolver {
            async fn resolve(&self, _domain: &str, _deadline: Option<Instant>) -> ResolutionStatus {
                let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                self.current.fetch_sub(1, Ordering::SeqCst);
                ResolutionStatus::Resolvable
            }
        }

        let resolver = Arc::new(GaugeResolver {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let config = Config {
            blacklist_sources: Vec::new(),
            bulk_concurrency: 2,
            ..Config::default()
        };
        let shared: Arc<dyn Resolve> = resolver.clone();
        let checker = EmailChecker::new(&config, test_store(), shared);

        let emails: Vec<String> = (0..6).map(|i| format!("user@domain{i}.example")).collect();
        checker.check_bulk(&emails).await;

        assert!(resolver.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_bulk_isolates_a_failed_worker() {
        struct PanickyResolver;

        #[async_trait]
        impl Resolve for PanickyResolver {
            async fn resolve(&self, domain: &str, _deadline: Option<Instant>) -> ResolutionStatus {
                if domain == "boom.example" {
                    panic!("resolver blew up");
                }
                ResolutionStatus::Resolvable
            }
        }

        let checker = EmailChecker::new(&test_config(), test_store(), Arc::new(PanickyResolver));

        let emails = vec![
            "a@fine.example".to_string(),
            "b@boom.example".to_string(),
            "c@fine.example".to_string(),
        ];
        let report = checker.check_bulk(&emails).await;

        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].as_verdict().is_some());
        assert!(report.results[2].as_verdict().is_some());
        match &report.results[1] {
            BulkEntry::Error(entry) => assert_eq!(entry.email, "b@boom.example"),
            BulkEntry::Verdict(_) => panic!("expected an error entry"),
        }
        assert_eq!(report.summary.error_count, 1);
        assert_eq!(report.summary.valid_count, 2);
    }

    #[tokio::test]
    async fn test_stats_snapshot_reflects_activity() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Resolvable));

        checker.check("user@one.example").await;
        checker.check("user@one.example").await;
        checker
            .check_bulk(&["user@two.example".to_string(), "bad".to_string()])
            .await;

        let stats = checker.stats();
        assert_eq!(stats.emails_checked, 4);
        assert_eq!(stats.bulk_batches, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.resolution_lookups, 2);
        assert_eq!(stats.disposable_domains_count, 3);
        assert_eq!(stats.whitelist_domains_count, 2);
        assert_eq!(stats.cache_ttl_seconds, 3600);
        assert!(chrono::DateTime::parse_from_rfc3339(&stats.started_at).is_ok());
    }

    #[tokio::test]
    async fn test_health_is_healthy_with_loaded_lists_and_recent_lookups() {
        let checker = checker_with(resolver_returning(ResolutionStatus::Resolvable));
        checker.check("user@somewhere.example").await;

        let report = checker.health().await;

        assert!(report.is_healthy());
        assert_eq!(report.status, "healthy");
        for key in ["domain_lists", "resolver", "cache", "engine"] {
            assert!(report.checks.contains_key(key), "missing check {key}");
        }
        assert_eq!(report.checks["resolver"].status, "healthy");
    }

    #[tokio::test]
    async fn test_health_warns_before_first_lookup() {
        let checker = checker_with(never_resolving());

        let report = checker.health().await;

        // A warning does not make the service unhealthy
        assert!(report.is_healthy());
        assert_eq!(report.checks["resolver"].status, "warning");
    }

    #[tokio::test]
    async fn test_health_fails_on_empty_blacklist() {
        let checker = EmailChecker::new(
            &test_config(),
            DomainListStore::from_sets(&[], &[]),
            Arc::new(never_resolving()),
        );

        let report = checker.health().await;

        assert!(!report.is_healthy());
        assert_eq!(report.status, "unhealthy");
        assert!(report.checks["domain_lists"].is_unhealthy());
    }

    #[tokio::test]
    async fn test_update_domains_reloads_and_invalidates_verdicts() {
        let dir = std::env::temp_dir();
        let blacklist = dir.join(format!("dec-engine-bl-{}.json", std::process::id()));
        std::fs::write(&blacklist, r#"["throwaway.example"]"#).unwrap();

        let store = DomainListStore::open(
            &blacklist,
            dir.join(format!("dec-engine-wl-{}.json", std::process::id())),
        );
        store.reload().unwrap();

        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_, _| ResolutionStatus::Resolvable);
        let checker = EmailChecker::new(&test_config(), store, Arc::new(resolver));

        let before = checker.check("user@throwaway.example").await;
        assert!(before.is_disposable);

        // The domain leaves the blacklist; the cached verdict must not outlive it
        std::fs::write(&blacklist, r#"["different.example"]"#).unwrap();
        let (disposable, whitelisted) = checker.update_domains().await.unwrap();
        assert_eq!((disposable, whitelisted), (1, 0));

        // Resolution survives the reload, so the single expected lookup holds
        let after = checker.check("user@throwaway.example").await;
        assert!(!after.is_disposable);
        assert_eq!(after.risk_score, 10);

        let _ = std::fs::remove_file(&blacklist);
    }

    #[tokio::test]
    async fn test_domains_listing_reads_the_serving_lists() {
        let checker = checker_with(never_resolving());

        let page = checker.domains(ListKind::Disposable, Some("tempmail"), 0, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.domains, vec!["tempmail.org"]);

        let page = checker.domains(ListKind::Whitelist, None, 0, 10);
        assert_eq!(page.total, 2);
    }
}
