//! # rangecache
//!
//! Bounded LRU cache for inclusive range-sum queries over a mutable array.
//!
//! ## Architecture
//! - **HashMap**: AHash for fast range-key lookups (O(1))
//! - **LRU List**: Doubly-linked list for eviction (O(1))
//! - **Invalidation**: a point update removes exactly the entries whose
//!   range covers the updated index
//! - **Integration**: wraps [`rangestore::ArrayStore`] for transparent caching
//!
//! ## Guarantees
//! - A cache hit always equals a fresh linear recomputation
//! - Cache size never exceeds the fixed capacity
//! - Hit/miss/eviction/invalidation statistics

#![warn(missing_docs)]

mod cache;
mod lru;
mod stats;

pub use cache::CachedArray;
pub use lru::{RangeKey, RangeLru};
pub use stats::CacheStats;
