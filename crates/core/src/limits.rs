//! Size limits for keys
//!
//! This module defines configurable size limits enforced at key construction.
//! Violations surface as `KeyError` variants.
//!
//! ## Contract
//!
//! The default limits are frozen; custom limits can be supplied when a key is
//! built with `Key::with_limits`.

/// Size limits for keys
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum number of segments in a key (default: 64)
    pub max_segments: usize,

    /// Maximum segment length in bytes (default: 1024)
    pub max_segment_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_segments: 64,
            max_segment_bytes: 1024,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large keys.
    pub fn with_small_limits() -> Self {
        Limits {
            max_segments: 4,
            max_segment_bytes: 16,
        }
    }
}
