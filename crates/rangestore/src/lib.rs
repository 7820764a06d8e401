//! # rangestore
//!
//! Fixed-length integer array store answering point reads, point writes, and
//! inclusive range-sum queries by linear accumulation.
//!
//! This is the leaf of the range-sum stack: it knows nothing about caching.
//! `range_sum` is the expensive primitive the cache layer exists to avoid
//! repeating.

#![warn(missing_docs)]

mod error;
mod store;

pub use error::{Error, Result};
pub use store::ArrayStore;
