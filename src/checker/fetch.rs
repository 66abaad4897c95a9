//! Remote blacklist refresh.
//!
//! Downloads each configured source, merges the results with the domains
//! already on disk, and writes the combined list back to the blacklist file.
//! Individual sources are allowed to fail; the refresh only errors when no
//! source produced anything.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use futures::future::join_all;
use log::{info, warn};

use crate::checker::lists::{read_domain_file, ListError};

const USER_AGENT: &str = concat!("DisposableEmailChecker/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const FETCH_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Fetches every source, merges the union with the current file contents and
/// writes the result back. Returns the merged domain count.
pub async fn refresh_blacklist(sources: &[String], path: &Path) -> Result<usize, ListError> {
    if sources.is_empty() {
        return Err(ListError::NoSources);
    }

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(ListError::Client)?;

    let fetches = sources.iter().map(|url| fetch_source(&client, url));
    let outcomes = join_all(fetches).await;

    let mut merged = match read_domain_file(path) {
        Ok(existing) => existing,
        Err(err) => {
            warn!("starting refresh from an empty list, {path:?} unreadable: {err}");
            HashSet::new()
        }
    };
    let before = merged.len();

    let mut fetched_any = false;
    for (url, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            Ok(domains) => {
                info!("fetched {} domains from {url}", domains.len());
                merged.extend(domains);
                fetched_any = true;
            }
            Err(err) => warn!("skipping source {url}: {err}"),
        }
    }
    if !fetched_any {
        return Err(ListError::NoSources);
    }

    write_domains(path, &merged).await?;
    info!(
        "blacklist refreshed: {} domains ({} new)",
        merged.len(),
        merged.len() - before
    );
    Ok(merged.len())
}

async fn fetch_source(client: &reqwest::Client, url: &str) -> Result<HashSet<String>, ListError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_fetch(client, url).await {
            Ok(domains) => return Ok(domains),
            Err(err) if attempt < FETCH_ATTEMPTS => {
                warn!("attempt {attempt} for {url} failed: {err}");
                tokio::time::sleep(RETRY_DELAY * attempt).await;
            }
            Err(source) => {
                return Err(ListError::Fetch {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> Result<HashSet<String>, reqwest::Error> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_body(&body))
}

/// Parses a fetched list body. Sources publish either plain line-oriented
/// text (optionally with `#` comments) or a JSON string array.
fn parse_body(body: &str) -> HashSet<String> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') {
        if let Ok(entries) = serde_json::from_str::<Vec<String>>(trimmed) {
            return entries.iter().filter_map(|entry| clean_domain(entry)).collect();
        }
    }
    body.lines().filter_map(clean_domain).collect()
}

fn clean_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().trim_end_matches('.').to_lowercase();
    if domain.is_empty() || domain.starts_with('#') || !domain.contains('.') {
        return None;
    }
    Some(domain)
}

async fn write_domains(path: &Path, domains: &HashSet<String>) -> Result<(), ListError> {
    let mut sorted: Vec<&str> = domains.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let json = serde_json::to_string_pretty(&sorted).map_err(|source| ListError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ListError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
        }
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|source| ListError::Io {
            path: path.display().to_string(),
            source,
        })
}
