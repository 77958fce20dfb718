//! Error types for the indexkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. a zero population limit).
//! - [`InvariantError`]: Returned by
//!   [`IndexCache::check_invariants`](crate::cache::IndexCache::check_invariants)
//!   when the entry table and counter table disagree or the population bound
//!   is exceeded.
//!
//! A lookup never produces an error: a value that is not in the sequence is
//! reported as `None`.
//!
//! ## Example Usage
//!
//! ```
//! use indexkit::cache::IndexCache;
//! use indexkit::error::ConfigError;
//!
//! let cache: Result<IndexCache<u32>, ConfigError> = IndexCache::try_with_limit(16);
//! assert!(cache.is_ok());
//!
//! // A zero limit is caught without panicking
//! let bad = IndexCache::<u32>::try_with_limit(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`IndexCache::try_with_limit`](crate::cache::IndexCache::try_with_limit)
/// and [`IndexCacheBuilder::try_build`](crate::builder::IndexCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use indexkit::cache::IndexCache;
///
/// let err = IndexCache::<u64>::try_with_limit(0).unwrap_err();
/// assert!(err.to_string().contains("limit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The population limit was zero; a cache must retain at least the
    /// entry it has just built.
    pub fn zero_limit() -> Self {
        Self::new("population limit must be greater than zero")
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal tables are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
