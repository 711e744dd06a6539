//! Hierarchical slot keys
//!
//! A key is an ordered, non-empty sequence of string segments, e.g.
//! `["user", "profile", "name"]`. Two keys are equal iff they have the same
//! length and identical segments in order.
//!
//! ## Governing prefix
//!
//! Key A *governs* key B iff A's segments match B's leading segments in
//! order (A may be shorter than or equal in length to B). Retrieval from the
//! persisted store matches by governing prefix; change notifications match
//! by exact key equality only. Both rules live here so call sites state
//! which one they use.
//!
//! ## Contract
//!
//! - Keys must contain at least one segment
//! - Keys must not exceed `max_segments` (default: 64)
//! - Segments must not exceed `max_segment_bytes` (default: 1024)
//!
//! Segments themselves may be any strings, including empty ones.

use crate::limits::Limits;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hierarchical key identifying a state slot
///
/// Constructed only through validating constructors, so every `Key` in the
/// system holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key(Vec<String>);

impl Key {
    /// Build a key from segments, validating against default limits
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstate_core::Key;
    ///
    /// let key = Key::new(["user", "profile", "name"]).unwrap();
    /// assert_eq!(key.len(), 3);
    ///
    /// assert!(Key::new(Vec::<String>::new()).is_err()); // empty
    /// ```
    pub fn new<I, S>(segments: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_limits(segments, &Limits::default())
    }

    /// Build a key from segments, validating against custom limits
    pub fn with_limits<I, S>(segments: I, limits: &Limits) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        validate_segments(&segments, limits)?;
        Ok(Key(segments))
    }

    /// The ordered segments of this key
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (always at least 1)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept so `len` follows the usual pairing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this key governs `other`
    ///
    /// True iff this key's segments equal `other`'s leading segments in
    /// order. A key governs itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstate_core::Key;
    ///
    /// let a = Key::new(["a"]).unwrap();
    /// let ab = Key::new(["a", "b"]).unwrap();
    /// assert!(a.governs(&ab));
    /// assert!(ab.governs(&ab));
    /// assert!(!ab.governs(&a));
    /// ```
    pub fn governs(&self, other: &Key) -> bool {
        self.0.len() <= other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }

    /// Consume the key, yielding its segments
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

// Deserialization re-validates the structural invariant so a decoded key is
// never empty. Limits are construction-time configuration and are not
// re-applied when reloading persisted keys.
impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let segments = Vec::<String>::deserialize(deserializer)?;
        if segments.is_empty() {
            return Err(de::Error::custom(KeyError::Empty));
        }
        Ok(Key(segments))
    }
}

/// Validate key segments against limits
fn validate_segments(segments: &[String], limits: &Limits) -> Result<(), KeyError> {
    // Rule 1: Key cannot be empty
    if segments.is_empty() {
        return Err(KeyError::Empty);
    }

    // Rule 2: Key cannot exceed max segment count
    if segments.len() > limits.max_segments {
        return Err(KeyError::TooManySegments {
            actual: segments.len(),
            max: limits.max_segments,
        });
    }

    // Rule 3: No segment may exceed max length
    for segment in segments {
        if segment.len() > limits.max_segment_bytes {
            return Err(KeyError::SegmentTooLong {
                actual: segment.len(),
                max: limits.max_segment_bytes,
            });
        }
    }

    Ok(())
}

/// Key validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key has no segments
    #[error("Key cannot be empty")]
    Empty,

    /// Key exceeds maximum segment count
    #[error("Key has too many segments: {actual} exceeds maximum {max}")]
    TooManySegments {
        /// Actual segment count
        actual: usize,
        /// Maximum allowed count
        max: usize,
    },

    /// Segment exceeds maximum length
    #[error("Key segment too long: {actual} bytes exceeds maximum {max}")]
    SegmentTooLong {
        /// Actual segment length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}
