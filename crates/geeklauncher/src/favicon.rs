//! Favicon URL derivation
//!
//! Maps a site URL onto the favicon service so front-ends can render
//! tiles without fetching anything themselves.

use crate::config::favicon::{FALLBACK_DOMAIN, SERVICE_URL, SIZE};
use url::Url;

/// Build the favicon service URL for a site URL
///
/// Never fails: a URL that can't be parsed, or that has no host,
/// falls back to [`FALLBACK_DOMAIN`].
pub fn favicon_url(url: &str) -> String {
    let domain = host_of(url).unwrap_or_else(|| FALLBACK_DOMAIN.to_string());
    service_url(&domain)
}

/// Hostname component of `url`, if it parses and has one
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(host.to_string()),
        _ => None,
    }
}

fn service_url(domain: &str) -> String {
    format!("{SERVICE_URL}?domain={domain}&sz={SIZE}")
}
