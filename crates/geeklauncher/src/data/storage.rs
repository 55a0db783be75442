//! Storage layer for the key/value store
//!
//! The site list lives under a single key. [`KeyValueStore`] is the only
//! capability the rest of the crate needs, so tests can swap the file-backed
//! store for [`MemoryStore`].

use crate::config::app::NAME;
use crate::config::storage::STORE_FILE;
use crate::error::{LauncherError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// String key/value storage with whole-value reads and writes
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one value already present
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Raw value under `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Key/value store backed by one JSON object file
///
/// The file holds `{ "key": "value", ... }`. A missing or empty file
/// holds no keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at a specific path (for testing and custom locations)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_store_path()?))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = read_file(&self.path)?.unwrap_or_default();
        parse_entries(&content).map_err(|e| {
            LauncherError::StorageRead(format!("Failed to parse {:?}: {}", self.path, e))
        })
    }
}

/// Parse the store file, empty content holds no keys
fn parse_entries(content: &str) -> serde_json::Result<BTreeMap<String, String>> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(content)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // I/O failures propagate so other keys are never lost; only a file
        // that reads fine but isn't a JSON object is replaced
        let content = read_file(&self.path)?.unwrap_or_default();
        let mut entries = parse_entries(&content).unwrap_or_else(|e| {
            tracing::warn!("Discarding unparseable store {:?}: {e}", self.path);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_if_needed(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&entries).map_err(|e| {
            LauncherError::StorageWrite(format!("Failed to serialize store: {}", e))
        })?;

        write_file(&self.path, &content)
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        LauncherError::Config(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

/// Path of the default store file
pub fn default_store_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(STORE_FILE))
}

/// Create a directory if it doesn't exist, with proper error handling
fn create_dir_if_needed(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot create directory {:?}", path)
            }
            _ => format!("Failed to create directory {:?}: {}", path, e),
        };
        LauncherError::StorageWrite(msg)
    })
}

/// Read file contents, `None` if the file doesn't exist
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            ErrorKind::PermissionDenied => Err(LauncherError::StorageRead(format!(
                "Permission denied: cannot read {:?}",
                path
            ))),
            _ => Err(LauncherError::StorageRead(format!(
                "Failed to read {:?}: {}",
                path, e
            ))),
        },
    }
}

/// Temporary file written next to `path` before being renamed over it
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace file contents atomically
///
/// The content goes to a staging file first and is renamed into place, so
/// readers see either the old file or the new one, never a partial write.
fn write_file(path: &Path, content: &str) -> Result<()> {
    let staging = staging_path(path);
    let written = File::create(&staging)
        .and_then(|mut f| {
            f.write_all(content.as_bytes())?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(&staging, path));

    written.map_err(|e| {
        let _ = fs::remove_file(&staging);
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot write to {:?}", path)
            }
            ErrorKind::NotFound => {
                format!("Cannot write to {:?}: parent directory does not exist", path)
            }
            _ => format!("Failed to write to {:?}: {}", path, e),
        };
        LauncherError::StorageWrite(msg)
    })
}
