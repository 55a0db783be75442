//! Site list management
//!
//! Owns the in-memory site list and writes it back to the key/value store
//! after every change.

use crate::config::storage::SITES_KEY;
use crate::data::draft::SiteDraft;
use crate::data::storage::KeyValueStore;
use crate::data::types::{default_sites, normalize_url, now_millis, Site};
use crate::error::{LauncherError, Result, ValidationError};

/// Handle returned by [`SiteStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Site])>;

// =============================================================================
// Persistence gateway
// =============================================================================

/// Read the stored site list
///
/// Returns `None` if nothing (or an empty value) is stored.
/// Returns an error if the value can't be read or parsed.
pub fn load_sites<S: KeyValueStore + ?Sized>(storage: &S) -> Result<Option<Vec<Site>>> {
    let raw = match storage.get(SITES_KEY)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    let sites = serde_json::from_str(&raw).map_err(|e| {
        LauncherError::StorageRead(format!("Failed to parse stored sites: {}", e))
    })?;

    Ok(Some(sites))
}

/// Overwrite the stored site list
pub fn save_sites<S: KeyValueStore + ?Sized>(storage: &mut S, sites: &[Site]) -> Result<()> {
    let raw = serde_json::to_string(sites).map_err(|e| {
        LauncherError::StorageWrite(format!("Failed to serialize sites: {}", e))
    })?;
    storage.set(SITES_KEY, &raw)
}

/// Largest id in `sites` that is a plain number, 0 if there is none
fn highest_numeric_id(sites: &[Site]) -> u64 {
    sites
        .iter()
        .filter_map(|s| s.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

// =============================================================================
// SiteStore
// =============================================================================

/// The launcher's site list
///
/// All mutation goes through [`add`](Self::add) and [`delete`](Self::delete);
/// each one writes the full list back to storage before returning and then
/// notifies subscribers.
pub struct SiteStore<S: KeyValueStore> {
    storage: S,
    sites: Vec<Site>,
    /// Last id handed out, keeps generated ids strictly increasing
    last_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> SiteStore<S> {
    /// Load the site list from `storage`
    ///
    /// Nothing stored: the defaults are used and written back.
    /// Unreadable or corrupt data: the defaults are used and the stored
    /// value is left alone.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            sites: Vec::new(),
            last_id: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        };

        match load_sites(&store.storage) {
            Ok(Some(sites)) => {
                tracing::debug!(count = sites.len(), "Loaded sites");
                store.sites = sites;
            }
            Ok(None) => {
                store.sites = default_sites();
                store.persist();
            }
            Err(e) => {
                tracing::error!("Failed to load sites: {e}");
                store.sites = default_sites();
            }
        }

        store.last_id = highest_numeric_id(&store.sites);
        store
    }

    /// Write the current list to storage
    pub fn save(&mut self) -> Result<()> {
        save_sites(&mut self.storage, &self.sites)
    }

    /// Add a site and persist
    ///
    /// Name and URL are trimmed; a URL without an http(s) scheme gets
    /// `https://`. The new site goes to the end of the list.
    pub fn add(&mut self, name: &str, raw_url: &str) -> std::result::Result<Site, ValidationError> {
        let name = name.trim();
        let url = raw_url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(ValidationError::Empty);
        }

        let id = self.next_id();
        let site = Site::new(id.to_string(), name, normalize_url(url));
        tracing::debug!(id = %site.id, url = %site.url, "Adding site");

        self.sites.push(site.clone());
        self.persist();
        self.notify();
        Ok(site)
    }

    /// Add the site described by `draft`
    ///
    /// On success the draft is cleared and the add form closed; on
    /// failure the draft is left as typed.
    pub fn submit(&mut self, draft: &mut SiteDraft) -> std::result::Result<Site, ValidationError> {
        let site = self.add(&draft.name, &draft.url)?;
        draft.reset();
        Ok(site)
    }

    /// Remove every site with this id and persist
    ///
    /// Returns how many were removed; an unknown id removes nothing.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.sites.len();
        self.sites.retain(|s| s.id != id);
        let removed = before - self.sites.len();
        tracing::debug!(id, removed, "Deleting site");

        self.persist();
        self.notify();
        removed
    }

    /// Current list, in insertion order
    pub fn list(&self) -> &[Site] {
        &self.sites
    }

    /// Get a site by id
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Get number of sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Call `listener` with the new list after every add or delete
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Site]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save, treating failure as non-fatal
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save sites: {e}");
        }
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.sites);
        }
    }

    fn next_id(&mut self) -> u64 {
        let now = now_millis();
        self.last_id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id
    }
}
