//! Error types shared by the containers.
//!
//! Not-found outcomes are never errors: lookups and removals report them as
//! `None`/`false`.

use std::collections::TryReserveError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("[HashTable] allocation of {requested} slots failed: {source}")]
    AllocationFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("[HashTable] key copy of {len} bytes failed: {source}")]
    KeyAllocationFailed {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("[HashTable] capacity {capacity} cannot be doubled")]
    CapacityOverflow { capacity: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("[List] index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
