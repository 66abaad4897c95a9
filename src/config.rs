use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default blacklist sources, fetched on demand when the local list is
/// missing or an update is requested.
pub const DEFAULT_BLACKLIST_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/martenson/disposable-email-domains/master/disposable_email_blocklist.conf",
    "https://raw.githubusercontent.com/disposable/disposable-email-domains/master/domains.txt",
    "https://raw.githubusercontent.com/wesbos/burner-email-providers/master/emails.txt",
    "https://raw.githubusercontent.com/ivolo/disposable-email-domains/master/index.json",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// # Service Configuration
///
/// Read once at startup from environment variables (a `.env` file is loaded
/// first when present). Immutable afterwards; the only runtime mutation the
/// service performs is an explicit domain list reload.
#[derive(Debug, Clone)]
pub struct Config {
    /// `BIND_ADDR`, default `127.0.0.1:8080`
    pub bind_addr: String,
    /// `BLACKLIST_PATH`, default `data/disposable_domains.json`
    pub blacklist_path: PathBuf,
    /// `WHITELIST_PATH`, default `data/whitelist_domains.json`
    pub whitelist_path: PathBuf,
    /// `BLACKLIST_SOURCES`, comma-separated URLs; empty disables fetching
    pub blacklist_sources: Vec<String>,
    /// `RESOLVER_TIMEOUT_MS`, default 2000
    pub resolver_timeout: Duration,
    /// `CACHE_TTL_SECS`, default 3600
    pub cache_ttl: Duration,
    /// `RESOLUTION_TTL_SECS`, default 300
    pub resolution_ttl: Duration,
    /// `CACHE_MAX_ENTRIES`, default 10000
    pub cache_max_entries: usize,
    /// `BULK_MAX_EMAILS`, default 100
    pub bulk_max_emails: usize,
    /// `BULK_CONCURRENCY`, default 10
    pub bulk_concurrency: usize,
    /// `BULK_DEADLINE_MS`, default 30000
    pub bulk_deadline: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            blacklist_path: PathBuf::from("data/disposable_domains.json"),
            whitelist_path: PathBuf::from("data/whitelist_domains.json"),
            blacklist_sources: DEFAULT_BLACKLIST_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            resolver_timeout: Duration::from_millis(2000),
            cache_ttl: Duration::from_secs(3600),
            resolution_ttl: Duration::from_secs(300),
            cache_max_entries: 10_000,
            bulk_max_emails: 100,
            bulk_concurrency: 10,
            bulk_deadline: Duration::from_millis(30_000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any name/value lookup. The environment variant
    /// above and the tests share this path.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup("BIND_ADDR") {
            config.bind_addr = value;
        }
        if let Some(value) = lookup("BLACKLIST_PATH") {
            config.blacklist_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("WHITELIST_PATH") {
            config.whitelist_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("BLACKLIST_SOURCES") {
            config.blacklist_sources = value
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();
        }

        config.resolver_timeout =
            Duration::from_millis(parse(&lookup, "RESOLVER_TIMEOUT_MS", 2000)?);
        config.cache_ttl = Duration::from_secs(parse(&lookup, "CACHE_TTL_SECS", 3600)?);
        config.resolution_ttl = Duration::from_secs(parse(&lookup, "RESOLUTION_TTL_SECS", 300)?);
        config.cache_max_entries = parse(&lookup, "CACHE_MAX_ENTRIES", 10_000)? as usize;
        config.bulk_max_emails = parse(&lookup, "BULK_MAX_EMAILS", 100)? as usize;
        config.bulk_concurrency = parse(&lookup, "BULK_CONCURRENCY", 10)?.max(1) as usize;
        config.bulk_deadline = Duration::from_millis(parse(&lookup, "BULK_DEADLINE_MS", 30_000)?);

        Ok(config)
    }
}

fn parse(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            config.blacklist_path,
            PathBuf::from("data/disposable_domains.json")
        );
        assert_eq!(config.resolver_timeout, Duration::from_millis(2000));
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.resolution_ttl, Duration::from_secs(300));
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.bulk_max_emails, 100);
        assert_eq!(config.bulk_concurrency, 10);
        assert_eq!(config.bulk_deadline, Duration::from_millis(30_000));
        assert_eq!(config.blacklist_sources.len(), 4);
    }

    #[test]
    fn test_overrides_are_applied() {
        let lookup = lookup_from(&[
            ("BIND_ADDR", "0.0.0.0:9999"),
            ("BLACKLIST_PATH", "/srv/lists/bad.json"),
            ("RESOLVER_TIMEOUT_MS", "500"),
            ("CACHE_TTL_SECS", "60"),
            ("BULK_CONCURRENCY", "25"),
        ]);

        let config = Config::from_lookup(lookup).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9999");
        assert_eq!(config.blacklist_path, PathBuf::from("/srv/lists/bad.json"));
        assert_eq!(config.resolver_timeout, Duration::from_millis(500));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.bulk_concurrency, 25);
        // Untouched values keep their defaults
        assert_eq!(config.bulk_max_emails, 100);
    }

    #[test]
    fn test_sources_are_split_and_trimmed() {
        let lookup = lookup_from(&[(
            "BLACKLIST_SOURCES",
            "https://a.example/list.txt , https://b.example/list.json,",
        )]);

        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(
            config.blacklist_sources,
            vec![
                "https://a.example/list.txt".to_string(),
                "https://b.example/list.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_sources_disable_fetching() {
        let lookup = lookup_from(&[("BLACKLIST_SOURCES", "")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert!(config.blacklist_sources.is_empty());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let lookup = lookup_from(&[("CACHE_TTL_SECS", "soon")]);
        let err = Config::from_lookup(lookup).unwrap_err();
        assert!(err.to_string().contains("CACHE_TTL_SECS"));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let lookup = lookup_from(&[("BULK_CONCURRENCY", "0")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config.bulk_concurrency, 1);
    }
}
