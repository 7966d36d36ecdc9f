//! Trusted claim-domain validation

use once_cell::sync::Lazy;
use std::collections::HashSet;
use url::Url;

/// Social hosts that announce campaigns but never host claims
pub const ANNOUNCEMENT_ONLY_HOSTS: &[&str] = &[
    "x.com",
    "twitter.com",
];

static ANNOUNCEMENT_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    ANNOUNCEMENT_ONLY_HOSTS
        .iter()
        .map(|host| normalize_host(host))
        .collect()
});

/// Lowercase and strip a leading `www.`
pub fn normalize_host(host: &str) -> String {
    let lower = host.trim().to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

pub fn is_announcement_only_host(host: &str) -> bool {
    ANNOUNCEMENT_SET.contains(&normalize_host(host))
}

/// Host matches a trusted domain exactly or as a strict subdomain.
///
/// An empty trusted list never matches.
pub fn matches_trusted_host<S: AsRef<str>>(host: &str, trusted_domains: &[S]) -> bool {
    let host = normalize_host(host);
    if host.is_empty() {
        return false;
    }

    trusted_domains
        .iter()
        .map(|domain| normalize_host(domain.as_ref()))
        .filter(|domain| !domain.is_empty())
        .any(|domain| host == domain || host.ends_with(&format!(".{}", domain)))
}

/// Check whether an HTTPS claim URL is hosted on one of the trusted domains
pub fn is_trusted_claim_domain<S: AsRef<str>>(claim_url: &str, trusted_domains: &[S]) -> bool {
    let parsed = match Url::parse(claim_url) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "https" {
        return false;
    }

    match parsed.host_str() {
        Some(host) => matches_trusted_host(host, trusted_domains),
        None => false,
    }
}
