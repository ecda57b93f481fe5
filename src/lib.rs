//! # MAD Hash Table
//!
//! A Rust implementation of a separate-chaining hash table with randomized compression.
//!
//! Keys are hashed to a 64-bit code and compressed into a bucket index with the
//! multiply-add-divide (MAD) function `((hash * scale + shift) mod P) mod capacity`, where
//! `scale` and `shift` are drawn once per table and `P` is a large prime. Each bucket holds a
//! chain of entries that share an index.
//!
//! The table keeps its load factor between two thresholds. Crossing the upper one doubles the
//! target capacity, crossing the lower one halves it, and in both cases the actual capacity is
//! the next prime at or above the target. Every resize rehashes all entries into a new store.
//!
//! ## Basic Usage
//!
//! ```rust
//! use madhash::HashTable;
//!
//! // Create a table with a reproducible compressor
//! let mut table = HashTable::seeded();
//!
//! // Insert values
//! table.put(1, "a").unwrap();
//! table.put(2, "b").unwrap();
//!
//! // Update values: the previous value is handed back
//! assert_eq!(table.put(1, "c").unwrap(), Some("a"));
//! assert_eq!(table.get(&1), Some(&"c"));
//! assert_eq!(table.len(), 2);
//!
//! // Remove values
//! assert_eq!(table.remove(&1), Some("c"));
//! assert_eq!(table.get(&1), None);
//! ```
//!
//! ## Resizing
//!
//! ```rust
//! use madhash::{is_prime, HashTable};
//!
//! let mut table = HashTable::seeded();
//! assert_eq!(table.capacity(), 17);
//!
//! for i in 0..20 {
//!     table.put(i, i * i).unwrap();
//! }
//!
//! assert!(table.capacity() >= 34);
//! assert!(is_prime(table.capacity()));
//! assert!(table.load_factor() <= 0.7);
//! ```

/// Module implementing MAD compression of hash codes
mod compressor;
/// Module holding the table configuration
mod config;
/// Module defining the error type
mod error;
/// Module enumerating prime capacities
mod primes;
/// Module deciding when and how far to resize
mod resize;
/// Module implementing the chained hash table
mod table;
/// Module implementing the iteration views
mod views;

pub use compressor::{MAD_PRIME, MadCompressor};
pub use config::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_CAPACITY,
    DEFAULT_MIN_LOAD_FACTOR, TableConfig,
};
pub use error::TableError;
pub use primes::{Primes, is_prime, primes_in, primes_up_to};
pub use resize::{Resize, ResizePolicy};
pub use table::HashTable;
pub use views::{Iter, Keys, Values, ValuesMut};
