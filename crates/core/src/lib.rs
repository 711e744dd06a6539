//! Core types and traits for tabstate
//!
//! This crate defines the foundational types used throughout the system:
//! - Key: hierarchical slot key (ordered path segments)
//! - Value: unified value enum for all slot data
//! - Limits: configurable key size limits
//! - Error: error type hierarchy
//! - Traits: the StorageBackend seam to the host's key-value facility

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod traits;
pub mod value;

pub use error::{Error, Result};
pub use key::{Key, KeyError};
pub use limits::Limits;
pub use traits::StorageBackend;
pub use value::Value;
