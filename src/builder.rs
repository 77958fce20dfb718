//! Builder for [`IndexCache`] instances.
//!
//! ## Example
//!
//! ```rust
//! use indexkit::builder::IndexCacheBuilder;
//! use indexkit::ds::TrackedSeq;
//!
//! let cache = IndexCacheBuilder::new().limit(32).build::<u64>();
//! let seq = TrackedSeq::from(vec![9, 8, 7]);
//! assert_eq!(cache.index_of(&seq, &7), Some(2));
//! assert_eq!(cache.limit(), 32);
//! ```

use crate::cache::{DEFAULT_LIMIT, IndexCache};
use crate::error::ConfigError;
use crate::policy::LeastReferenced;

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct IndexCacheBuilder {
    limit: usize,
    capacity_hint: Option<usize>,
}

impl IndexCacheBuilder {
    /// Create a builder with the default limit of [`DEFAULT_LIMIT`] entries.
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            capacity_hint: None,
        }
    }

    /// Maximum number of entries retained between lookups.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Pre-size the key tables. Defaults to `limit + 1`; values above
    /// [`MAX_PRESIZE`](crate::cache::MAX_PRESIZE) are clamped.
    pub fn capacity_hint(mut self, capacity: usize) -> Self {
        self.capacity_hint = Some(capacity);
        self
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the limit is zero. Use [`try_build`](Self::try_build) for
    /// user-supplied configuration.
    pub fn build<T>(self) -> IndexCache<T> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Build the cache, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the limit is zero.
    ///
    /// ```rust
    /// use indexkit::builder::IndexCacheBuilder;
    ///
    /// assert!(IndexCacheBuilder::new().limit(0).try_build::<u8>().is_err());
    /// ```
    pub fn try_build<T>(self) -> Result<IndexCache<T>, ConfigError> {
        let policy = LeastReferenced::try_new(self.limit)?;
        let capacity_hint = self
            .capacity_hint
            .unwrap_or_else(|| self.limit.saturating_add(1));
        Ok(IndexCache::from_policy(policy, capacity_hint))
    }
}

impl Default for IndexCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::TrackedSeq;

    #[test]
    fn defaults_match_index_cache_new() {
        let built: IndexCache<u8> = IndexCacheBuilder::default().build();
        assert_eq!(built.limit(), IndexCache::<u8>::new().limit());
    }

    #[test]
    fn configured_limit_is_enforced() {
        let cache = IndexCacheBuilder::new().limit(2).capacity_hint(64).build();
        for i in 0..6u32 {
            let seq = TrackedSeq::from(vec![i]);
            assert_eq!(cache.index_of(&seq, &i), Some(0));
        }
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn large_limit_and_hint_build_without_allocating_up_front() {
        let cache = IndexCacheBuilder::new()
            .limit(usize::MAX / 2)
            .try_build::<u32>()
            .unwrap();
        assert_eq!(cache.limit(), usize::MAX / 2);

        let cache = IndexCacheBuilder::new()
            .limit(4)
            .capacity_hint(usize::MAX)
            .try_build::<u32>()
            .unwrap();
        let seq = TrackedSeq::from(vec![8, 9]);
        assert_eq!(cache.index_of(&seq, &9), Some(1));
        assert!(crate::cache::MAX_PRESIZE > DEFAULT_LIMIT);
    }

    #[test]
    fn zero_limit_is_a_config_error() {
        let err = IndexCacheBuilder::new()
            .limit(0)
            .try_build::<u8>()
            .unwrap_err();
        assert_eq!(err.message(), "population limit must be greater than zero");
    }

    #[test]
    #[should_panic(expected = "population limit")]
    fn build_panics_on_zero_limit() {
        let _ = IndexCacheBuilder::new().limit(0).build::<u8>();
    }
}
