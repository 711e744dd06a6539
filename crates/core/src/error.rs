//! Error types for the tabstate store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::key::KeyError;
use std::io;
use thiserror::Error;

/// Result type alias for tabstate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the tabstate store
#[derive(Debug, Error)]
pub enum Error {
    /// Key failed validation at slot creation
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Persistence requested without a usable key
    ///
    /// Unreachable for slots created through the public API, since `Key`
    /// cannot be constructed empty. Kept for the write-through path.
    #[error("Persistence misconfigured: {0}")]
    PersistConfig(String),

    /// Stored blob failed to parse as the expected array-of-pairs shape
    #[error("Stored data corrupt: {0}")]
    Corruption(String),

    /// Value cannot be encoded for persistence
    #[error("Value not serializable: {0}")]
    NotSerializable(String),

    /// Storage backend failure (read or write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error (file-backed storage)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Check whether this is a corruption error
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corruption(_))
    }

    /// Check whether this is a key validation error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Error::InvalidKey(_))
    }
}
