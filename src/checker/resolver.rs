//! Domain resolvability probing over DNS.
//!
//! A domain can receive mail when it publishes MX records, or, per RFC 5321
//! implicit MX, when it resolves to an address at all. Lookups are bounded:
//! a slow or failing resolver produces [`ResolutionStatus::Unknown`] instead
//! of an error, so classification never stalls behind DNS.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::time::{timeout_at, Instant};
use trust_dns_resolver::{
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    TokioAsyncResolver,
};

/// Outcome of a resolvability probe.
///
/// `Resolvable` and `NotResolvable` are authoritative answers from DNS;
/// `Unknown` covers timeouts and transient failures and must never be
/// treated as proof in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Resolvable,
    NotResolvable,
    Unknown,
}

impl ResolutionStatus {
    /// Maps onto the wire representation of the MX check: `None` when no
    /// authoritative answer was obtained.
    pub fn as_option_bool(self) -> Option<bool> {
        match self {
            ResolutionStatus::Resolvable => Some(true),
            ResolutionStatus::NotResolvable => Some(false),
            ResolutionStatus::Unknown => None,
        }
    }

    pub fn is_definitive(self) -> bool {
        !matches!(self, ResolutionStatus::Unknown)
    }
}

/// Resolvability lookups behind a seam so the classification pipeline can be
/// tested without touching the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Probes one normalized domain. `deadline`, when given, further clamps
    /// the lookup; a deadline already in the past yields `Unknown` without
    /// any I/O.
    async fn resolve(&self, domain: &str, deadline: Option<Instant>) -> ResolutionStatus;
}

/// DNS-backed resolver checking MX records first and falling back to
/// A/AAAA records.
pub struct MxResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl MxResolver {
    /// `timeout` bounds the whole probe for one domain, including the
    /// address-record fallback.
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 2;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
            timeout,
        }
    }

    async fn probe(&self, domain: &str) -> ResolutionStatus {
        match self.resolver.mx_lookup(domain).await {
            Ok(records) if records.iter().next().is_some() => {
                return ResolutionStatus::Resolvable
            }
            Ok(_) => {}
            Err(err) => {
                if !is_authoritative_negative(&err) {
                    debug!("mx lookup for {domain} failed: {err}");
                    return ResolutionStatus::Unknown;
                }
            }
        }

        // No MX published. RFC 5321 implicit MX: an address record still
        // makes the domain deliverable.
        match self.resolver.lookup_ip(domain).await {
            Ok(addresses) if addresses.iter().next().is_some() => ResolutionStatus::Resolvable,
            Ok(_) => ResolutionStatus::NotResolvable,
            Err(err) if is_authoritative_negative(&err) => ResolutionStatus::NotResolvable,
            Err(err) => {
                debug!("address lookup for {domain} failed: {err}");
                ResolutionStatus::Unknown
            }
        }
    }
}

#[async_trait]
impl Resolve for MxResolver {
    async fn resolve(&self, domain: &str, deadline: Option<Instant>) -> ResolutionStatus {
        let mut limit = Instant::now() + self.timeout;
        if let Some(deadline) = deadline {
            limit = limit.min(deadline);
        }
        if limit <= Instant::now() {
            return ResolutionStatus::Unknown;
        }

        match timeout_at(limit, self.probe(domain)).await {
            Ok(status) => status,
            Err(_) => {
                debug!("resolution timed out for {domain}");
                ResolutionStatus::Unknown
            }
        }
    }
}

/// NXDOMAIN and NODATA both surface as `NoRecordsFound`; everything else
/// (timeouts, SERVFAIL, connectivity) is treated as transient.
fn is_authoritative_negative(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
