//! CachedArray: LRU range-sum cache wrapping ArrayStore

use std::sync::Arc;
use parking_lot::RwLock;
use rangestore::{ArrayStore, Error, Result};

use crate::lru::{RangeKey, RangeLru};
use crate::stats::CacheStats;

/// Cached query layer combining an LRU range-sum cache with an ArrayStore
/// backend.
///
/// Caching is exact-key: only a query issued with identical bounds as a
/// prior query can hit. A point update invalidates exactly the entries whose
/// range covers the updated index, so every hit equals what a fresh linear
/// recomputation would return.
pub struct CachedArray {
    /// Underlying array storage
    store: ArrayStore,

    /// LRU cache of memoized range sums
    cache: Arc<RwLock<RangeLru>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Cache capacity
    capacity: usize,
}

impl CachedArray {
    /// Create a new CachedArray over `initial` with the given cache capacity
    ///
    /// The cache starts empty regardless of capacity.
    ///
    /// # Arguments
    /// * `initial` - Initial array contents; length is fixed afterwards
    /// * `capacity` - Maximum number of cached range sums
    ///
    /// # Returns
    /// * `Result<CachedArray>` - `InvalidCapacity` if `capacity < 1`
    pub fn new(initial: Vec<i64>, capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            store: ArrayStore::new(initial),
            cache: Arc::new(RwLock::new(RangeLru::new(capacity))),
            stats: Arc::new(CacheStats::new()),
            capacity,
        })
    }

    /// Sum the elements over the inclusive range `[left, right]`
    ///
    /// Probes the cache first; a hit promotes the entry and returns the
    /// memoized sum. On a miss the sum is recomputed linearly, cached
    /// (evicting the least-recently-used entry at capacity), and returned.
    ///
    /// The cache lock is held across the miss-path recomputation so a
    /// concurrent update cannot slip between the computation and the insert
    /// and leave a stale entry behind.
    ///
    /// # Returns
    /// * `Result<i64>` - Sum, or `InvalidRange` for malformed bounds
    pub fn range_sum(&self, left: usize, right: usize) -> Result<i64> {
        let key = RangeKey::new(left, right);
        let mut cache = self.cache.write();

        if let Some(sum) = cache.try_get(key) {
            self.stats.record_hit();
            return Ok(sum);
        }

        // Cache miss - recompute from the store. An invalid range fails here
        // before any cache mutation.
        self.stats.record_miss();
        let sum = self.store.range_sum(left, right)?;

        if cache.put(key, sum) {
            self.stats.record_eviction();
        }

        Ok(sum)
    }

    /// Write `value` at `index` and invalidate every cached range covering it
    ///
    /// The store write and the invalidation happen under the cache write
    /// lock, so no concurrent `range_sum` can observe the new array value
    /// while a stale covering entry is still servable. Entries not covering
    /// `index` survive with their recency order untouched.
    ///
    /// # Returns
    /// * `Result<()>` - `IndexOutOfRange` on a bad index; the cache is left
    ///   untouched when the write fails
    pub fn update(&self, index: usize, value: i64) -> Result<()> {
        let mut cache = self.cache.write();

        self.store.write(index, value)?;
        let removed = cache.remove_covering(index);
        self.stats.record_invalidations(removed as u64);

        Ok(())
    }

    /// Read the element at `index` (bypasses the cache)
    pub fn read(&self, index: usize) -> Result<i64> {
        self.store.read(index)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of cached range sums
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the array length
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear the cache (array contents remain unchanged)
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write();
        cache.clear();
        self.stats.reset();
    }
}
