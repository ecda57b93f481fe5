//! Errors surfaced by [`HashTable`](crate::HashTable)
//!
//! A missing key is never an error: lookups and removals report absence with `None`.

use thiserror::Error;

/// Failures that abort a table operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No prime capacity exists between the resize target and the search horizon.
    ///
    /// The table keeps its previous bucket store when this is returned.
    #[error("no prime capacity found in [{target}, {horizon}]")]
    CapacityExhausted {
        /// Smallest acceptable capacity
        target: usize,
        /// Largest candidate that was examined
        horizon: usize,
    },
    /// Doubling the capacity does not fit in `usize`
    #[error("capacity {capacity} cannot be doubled without overflow")]
    CapacityOverflow {
        /// Capacity at the time of the failed growth
        capacity: usize,
    },
    /// A [`TableConfig`](crate::TableConfig) was rejected by validation
    #[error("invalid table configuration: {0}")]
    InvalidConfig(&'static str),
}
