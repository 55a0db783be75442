//! Error types for geeklauncher
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Rejected user input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in both Name and URL")]
    Empty,
}

/// Main error type for geeklauncher
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for geeklauncher
pub type Result<T> = std::result::Result<T, LauncherError>;
