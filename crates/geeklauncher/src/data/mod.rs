//! Data persistence
//!
//! Handles the site list, its key/value storage, and the add-form draft.

pub mod draft;
pub mod sites;
pub mod storage;
pub mod types;

// Re-export common types
pub use draft::SiteDraft;
pub use sites::{load_sites, save_sites, SiteStore, SubscriptionId};
pub use storage::{config_dir, default_store_path, FileStore, KeyValueStore, MemoryStore};
pub use types::{default_sites, normalize_url, Site};
