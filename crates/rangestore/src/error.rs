//! Error types for rangestore

use std::fmt;

/// Result type alias for rangestore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for array and cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index outside `[0, len)`
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Malformed `(left, right)` pair: `left > right` or a bound outside `[0, len)`
    InvalidRange {
        /// Left bound of the requested range
        left: usize,
        /// Right bound of the requested range
        right: usize,
        /// Array length
        len: usize,
    },

    /// Cache capacity must be at least 1
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            Error::InvalidRange { left, right, len } => {
                write!(
                    f,
                    "Invalid range [{}, {}] for length {}",
                    left, right, len
                )
            }
            Error::InvalidCapacity(given) => {
                write!(f, "Invalid cache capacity {} (must be >= 1)", given)
            }
        }
    }
}

impl std::error::Error for Error {}
