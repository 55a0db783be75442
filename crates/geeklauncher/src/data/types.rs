//! Common data types for persistence
//!
//! Shared types used across the data module.

use crate::config::defaults::SITES;
use crate::favicon;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// Helper functions
// =============================================================================

/// Prefix a URL with `https://` unless it already carries an http(s) scheme
///
/// The check is a plain prefix match; nothing else about the URL is validated.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// The built-in site list, in display order
pub fn default_sites() -> Vec<Site> {
    SITES
        .iter()
        .map(|(id, name, url)| Site::new(*id, *name, *url))
        .collect()
}

// =============================================================================
// Site - One launcher entry
// =============================================================================

/// A website shortcut
///
/// Serialized as `{ "id": ..., "name": ..., "url": ... }`, the same shape
/// the stored list uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    /// Unique within one list
    pub id: String,
    /// Display name
    pub name: String,
    /// Target URL, always with an http(s) scheme once added through the store
    pub url: String,
}

impl Site {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Favicon service URL for this site
    pub fn favicon_url(&self) -> String {
        favicon::favicon_url(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("example.com/a?b=1"), "https://example.com/a?b=1");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        // Only lowercase schemes count as present
        assert_eq!(normalize_url("HTTP://example.com"), "https://HTTP://example.com");
    }

    #[test]
    fn test_default_sites_order() {
        let sites = default_sites();
        let names: Vec<_> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Gemini", "DeepSeek", "ChatGPT", "Cloudflare", "同花顺"]);
        let ids: Vec<_> = sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(sites[4].url, "https://www.10jqka.com.cn");
    }

    #[test]
    fn test_site_json_shape() {
        let site = Site::new("42", "Docs", "https://docs.rs");
        let json = serde_json::to_string(&site).unwrap();
        assert_eq!(json, r#"{"id":"42","name":"Docs","url":"https://docs.rs"}"#);
    }

    #[test]
    fn test_site_favicon() {
        let site = Site::new("1", "Gemini", "https://gemini.google.com");
        assert_eq!(
            site.favicon_url(),
            "https://www.google.com/s2/favicons?domain=gemini.google.com&sz=64"
        );
    }

    #[test]
    fn test_now_millis_advances() {
        let a = now_millis();
        let b = now_millis();
        assert!(a > 0);
        assert!(b >= a);
    }
}
