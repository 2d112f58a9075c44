//! Cache key types.
//!
//! A [`CacheKey`] identifies one logical fetch. Two shapes exist:
//!
//! 1. **Page** - a window over a collection, identified by offset and limit
//! 2. **Record** - a single record, identified by its numeric id
//!
//! ## Format
//!
//! Keys render deterministically so they can be logged and compared:
//!
//! ```
//! use rosterbox_core::CacheKey;
//!
//! let key = CacheKey::page(0, 100);
//! assert_eq!(key.to_string(), "0:100");
//!
//! let key = CacheKey::record(7);
//! assert_eq!(key.to_string(), "7");
//! ```

use std::fmt;

/// A cache key identifying a memoized fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CacheKey {
    /// A page of a collection.
    Page {
        /// Number of records skipped before the page starts.
        offset: u64,
        /// Maximum number of records in the page.
        limit: u64,
    },
    /// A single record by identifier.
    Record(u64),
}

impl CacheKey {
    /// Creates a key for the page starting at `offset` holding at most `limit` records.
    pub fn page(offset: u64, limit: u64) -> Self {
        Self::Page { offset, limit }
    }

    /// Creates a key for the record with the given id.
    pub fn record(id: u64) -> Self {
        Self::Record(id)
    }

    /// Returns a short label for the key shape, used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Page { .. } => "page",
            Self::Record(_) => "record",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page { offset, limit } => write!(f, "{offset}:{limit}"),
            Self::Record(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for CacheKey {
    fn from(id: u64) -> Self {
        Self::Record(id)
    }
}

impl From<(u64, u64)> for CacheKey {
    fn from((offset, limit): (u64, u64)) -> Self {
        Self::Page { offset, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_format() {
        assert_eq!(CacheKey::page(10000, 500).to_string(), "10000:500");
    }

    #[test]
    fn test_distinct_pages_differ() {
        assert_ne!(CacheKey::page(0, 100), CacheKey::page(0, 101));
        assert_ne!(CacheKey::page(1, 100), CacheKey::page(0, 100));
    }

    #[test]
    fn test_record_is_not_a_page() {
        assert_ne!(CacheKey::record(0), CacheKey::page(0, 0));
        assert_eq!(CacheKey::record(7).kind(), "record");
        assert_eq!(CacheKey::from((3, 4)).kind(), "page");
    }
}
