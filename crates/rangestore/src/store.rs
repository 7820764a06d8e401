//! Array store implementation
//!
//! Holds the mutable integer array behind a `parking_lot::RwLock` so point
//! reads and range sums can run against `&self` while writes serialize.

use std::sync::Arc;
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// ArrayStore owns the current integer array.
///
/// The length is fixed at construction; only element values change afterwards.
pub struct ArrayStore {
    /// Element storage; the Vec is never resized after `new`
    data: Arc<RwLock<Vec<i64>>>,

    /// Array length, immutable after construction
    len: usize,
}

impl ArrayStore {
    /// Create a store from initial data. The length is fixed from here on.
    pub fn new(initial: Vec<i64>) -> Self {
        let len = initial.len();
        Self {
            data: Arc::new(RwLock::new(initial)),
            len,
        }
    }

    /// Read the element at `index`
    ///
    /// # Returns
    /// * `Result<i64>` - Element value, or `IndexOutOfRange`
    pub fn read(&self, index: usize) -> Result<i64> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        Ok(self.data.read()[index])
    }

    /// Write `value` to the element at `index`
    ///
    /// No cache awareness: callers that layer a cache on top are responsible
    /// for invalidating entries affected by this write.
    pub fn write(&self, index: usize, value: i64) -> Result<()> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        self.data.write()[index] = value;
        Ok(())
    }

    /// Sum the elements over the inclusive range `[left, right]`
    ///
    /// Linear accumulation, O(right - left + 1). Deterministic and side-effect
    /// free.
    ///
    /// # Returns
    /// * `Result<i64>` - Sum, or `InvalidRange` if `left > right` or a bound
    ///   is outside `[0, len)`
    pub fn range_sum(&self, left: usize, right: usize) -> Result<i64> {
        if left > right || right >= self.len {
            return Err(Error::InvalidRange {
                left,
                right,
                len: self.len,
            });
        }

        let data = self.data.read();
        Ok(data[left..=right].iter().sum())
    }

    /// Get the array length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
