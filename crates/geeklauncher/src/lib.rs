//! Geek Launcher
//!
//! A personal list of website shortcuts kept in a key/value store,
//! with favicon URLs for rendering them as tiles.
//!
//! ## Quick start
//!
//! ```
//! use geeklauncher::data::{MemoryStore, SiteStore};
//!
//! let mut store = SiteStore::load(MemoryStore::new());
//! let site = store.add("Docs", "docs.rs").unwrap();
//! assert_eq!(site.url, "https://docs.rs");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod favicon;

pub use favicon::favicon_url;
