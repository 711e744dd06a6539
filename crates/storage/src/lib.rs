//! Storage backends for tabstate
//!
//! Implementations of the [`StorageBackend`] seam defined in tabstate-core:
//! - [`MemoryBackend`]: blobs in a process-local map; the session-storage
//!   stand-in and the default for ephemeral stores
//! - [`FileBackend`]: one file per storage key under a root directory, for
//!   embedders that want slots to survive process restarts
//!
//! [`StorageBackend`]: tabstate_core::StorageBackend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;
