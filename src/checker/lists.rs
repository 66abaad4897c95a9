use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Errors raised while loading, reloading or refreshing domain lists. Fatal
/// only at startup when no blacklist data can be obtained at all; a failed
/// reload leaves the previous lists serving.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("cannot read domain list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse domain list {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("domain list {path} contains no domains")]
    Empty { path: String },
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("no blacklist sources produced any domains")]
    NoSources,
}

/// One immutable generation of both lists. Lookups are O(1) exact matches
/// against lowercased domains.
#[derive(Debug, Default)]
pub struct DomainSets {
    blacklist: HashSet<String>,
    whitelist: HashSet<String>,
}

impl DomainSets {
    /// Expects a normalized (lowercase) domain.
    pub fn is_blacklisted(&self, domain: &str) -> bool {
        self.blacklist.contains(domain)
    }

    /// Expects a normalized (lowercase) domain.
    pub fn is_whitelisted(&self, domain: &str) -> bool {
        self.whitelist.contains(domain)
    }

    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }
}

/// Which list a read-side query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Disposable,
    Whitelist,
}

impl ListKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "disposable" | "blacklist" => Some(ListKind::Disposable),
            "whitelist" => Some(ListKind::Whitelist),
            _ => None,
        }
    }
}

/// A page of domains from one list, for the domains endpoint.
#[derive(Debug)]
pub struct DomainPage {
    /// Domains matching the filter before paging.
    pub total: usize,
    pub domains: Vec<String>,
}

/// # Domain List Store
///
/// Holds the disposable blacklist and the provider whitelist as immutable
/// generations behind an atomic pointer swap. Readers take a snapshot and
/// see one consistent generation; `reload` builds a complete replacement
/// from the configured files and only then swaps it in. A failed reload
/// changes nothing.
pub struct DomainListStore {
    blacklist_path: PathBuf,
    whitelist_path: PathBuf,
    current: RwLock<Arc<DomainSets>>,
}

impl DomainListStore {
    /// Creates a store bound to its list files, initially empty. Call
    /// [`reload`](Self::reload) to populate it.
    pub fn open(blacklist_path: impl Into<PathBuf>, whitelist_path: impl Into<PathBuf>) -> Self {
        Self {
            blacklist_path: blacklist_path.into(),
            whitelist_path: whitelist_path.into(),
            current: RwLock::new(Arc::new(DomainSets::default())),
        }
    }

    pub fn blacklist_path(&self) -> &Path {
        &self.blacklist_path
    }

    /// One consistent generation for the duration of a check.
    pub fn snapshot(&self) -> Arc<DomainSets> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-reads both list files and swaps the new generation in. The
    /// blacklist must be readable and non-empty; the whitelist file may be
    /// absent. On error the previous generation keeps serving.
    pub fn reload(&self) -> Result<(usize, usize), ListError> {
        let blacklist = read_domain_file(&self.blacklist_path)?;
        if blacklist.is_empty() {
            return Err(ListError::Empty {
                path: self.blacklist_path.display().to_string(),
            });
        }

        let whitelist = if self.whitelist_path.exists() {
            read_domain_file(&self.whitelist_path)?
        } else {
            warn!(
                "whitelist file {} not found, continuing without a whitelist",
                self.whitelist_path.display()
            );
            HashSet::new()
        };

        let generation = DomainSets {
            blacklist,
            whitelist,
        };
        let counts = (generation.blacklist_len(), generation.whitelist_len());

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(generation);
        drop(current);

        info!(
            "domain lists loaded: {} disposable, {} whitelisted",
            counts.0, counts.1
        );
        Ok(counts)
    }

    /// (blacklist size, whitelist size) of the serving generation.
    pub fn counts(&self) -> (usize, usize) {
        let sets = self.snapshot();
        (sets.blacklist_len(), sets.whitelist_len())
    }

    /// Sorted, filtered page of one list.
    pub fn domains(
        &self,
        kind: ListKind,
        search: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> DomainPage {
        let sets = self.snapshot();
        let source = match kind {
            ListKind::Disposable => &sets.blacklist,
            ListKind::Whitelist => &sets.whitelist,
        };

        let needle = search.map(str::to_lowercase);
        let mut matching: Vec<&String> = source
            .iter()
            .filter(|domain| match &needle {
                Some(needle) => domain.contains(needle.as_str()),
                None => true,
            })
            .collect();
        matching.sort();

        let total = matching.len();
        let domains = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        DomainPage { total, domains }
    }

    #[cfg(test)]
    pub fn from_sets(blacklist: &[&str], whitelist: &[&str]) -> Self {
        let generation = DomainSets {
            blacklist: blacklist.iter().map(|d| d.to_lowercase()).collect(),
            whitelist: whitelist.iter().map(|d| d.to_lowercase()).collect(),
        };
        Self {
            blacklist_path: PathBuf::new(),
            whitelist_path: PathBuf::new(),
            current: RwLock::new(Arc::new(generation)),
        }
    }
}

/// Reads one list file. Two formats are accepted: a JSON array of strings,
/// or plain text with one domain per line (`#` starts a comment). Entries
/// are lowercased and root dots stripped; empty entries are skipped.
pub fn read_domain_file(path: &Path) -> Result<HashSet<String>, ListError> {
    let contents = fs::read_to_string(path).map_err(|source| ListError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let trimmed = contents.trim_start();
    let entries: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(&contents).map_err(|source| ListError::Parse {
            path: path.display().to_string(),
            source,
        })?
    } else {
        contents.lines().map(str::to_string).collect()
    };

    Ok(entries
        .iter()
        .map(|entry| entry.trim().trim_end_matches('.').to_lowercase())
        .filter(|entry| !entry.is_empty() && !entry.starts_with('#'))
        .collect())
}
