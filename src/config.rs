//! Tunable parameters of a [`HashTable`](crate::HashTable)

use crate::compressor::MAD_PRIME;
use crate::error::TableError;
use crate::primes::is_prime;

/// Bucket count of a freshly constructed table
pub const DEFAULT_INITIAL_CAPACITY: usize = 17;
/// Load factor above which the table grows
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;
/// Load factor below which the table shrinks
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.2;
/// Smallest capacity a shrink may produce
pub const DEFAULT_MIN_CAPACITY: usize = 3;

/// Sizing and seeding parameters for a [`HashTable`](crate::HashTable).
///
/// ```rust
/// use madhash::{HashTable, TableConfig};
///
/// let config = TableConfig::default().with_initial_capacity(31).with_seed(7);
/// let table: HashTable<u32, &str> = HashTable::with_config(config).unwrap();
/// assert_eq!(table.capacity(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated at construction and after `clear`, must be prime
    pub initial_capacity: usize,
    /// Growth is triggered once `len / capacity` exceeds this value
    pub max_load_factor: f64,
    /// Shrinking is triggered once `len / capacity` drops below this value
    pub min_load_factor: f64,
    /// Floor for shrinking, must be greater than 2
    pub min_capacity: usize,
    /// Upper bound of the prime search performed when resizing
    pub max_capacity: usize,
    /// Seed for the compressor's random draw; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
            min_capacity: DEFAULT_MIN_CAPACITY,
            max_capacity: MAD_PRIME,
            seed: None,
        }
    }
}

impl TableConfig {
    /// Sets the initial bucket count
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the grow and shrink thresholds
    #[must_use]
    pub fn with_load_factors(mut self, min: f64, max: f64) -> Self {
        self.min_load_factor = min;
        self.max_load_factor = max;
        self
    }

    /// Sets the shrink floor
    #[must_use]
    pub fn with_min_capacity(mut self, capacity: usize) -> Self {
        self.min_capacity = capacity;
        self
    }

    /// Caps the prime search horizon used by growth
    #[must_use]
    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Makes the compressor draw reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the parameters describe a usable table
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), TableError> {
        let in_unit_range = |f: f64| f > 0.0 && f <= 1.0;

        if !in_unit_range(self.max_load_factor) || !in_unit_range(self.min_load_factor) {
            return Err(TableError::InvalidConfig("load factors must lie in (0, 1]"));
        }
        if self.min_load_factor >= self.max_load_factor {
            return Err(TableError::InvalidConfig(
                "min_load_factor must be below max_load_factor",
            ));
        }
        // A shrink can double the load factor, so the band must be at least that wide
        if self.max_load_factor < 2.0 * self.min_load_factor {
            return Err(TableError::InvalidConfig(
                "max_load_factor must be at least twice min_load_factor",
            ));
        }
        if self.min_capacity <= 2 {
            return Err(TableError::InvalidConfig("min_capacity must be greater than 2"));
        }
        if self.initial_capacity < self.min_capacity {
            return Err(TableError::InvalidConfig("initial_capacity is below min_capacity"));
        }
        if self.initial_capacity > self.max_capacity {
            return Err(TableError::InvalidConfig("initial_capacity exceeds max_capacity"));
        }
        if !is_prime(self.initial_capacity) {
            return Err(TableError::InvalidConfig("initial_capacity must be prime"));
        }
        if self.max_capacity > MAD_PRIME {
            return Err(TableError::InvalidConfig(
                "max_capacity cannot exceed the compression modulus",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, 17);
        assert_eq!(config.seed, None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_inverted_load_factors() {
        let config = TableConfig::default().with_load_factors(0.8, 0.5);
        assert!(matches!(config.validate(), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_out_of_range_load_factor() {
        let config = TableConfig::default().with_load_factors(0.0, 0.7);
        assert!(config.validate().is_err());

        let config = TableConfig::default().with_load_factors(0.2, 1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_narrow_load_factor_band() {
        let config = TableConfig::default().with_load_factors(0.6, 0.7);
        assert_eq!(
            config.validate(),
            Err(TableError::InvalidConfig(
                "max_load_factor must be at least twice min_load_factor"
            ))
        );

        let config = TableConfig::default().with_load_factors(0.25, 0.5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_composite_initial_capacity() {
        let config = TableConfig::default().with_initial_capacity(64);
        assert_eq!(
            config.validate(),
            Err(TableError::InvalidConfig("initial_capacity must be prime"))
        );
        assert_eq!(TableConfig::default().with_initial_capacity(31).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_low_floor() {
        let config = TableConfig::default().with_min_capacity(2);
        assert_eq!(
            config.validate(),
            Err(TableError::InvalidConfig("min_capacity must be greater than 2"))
        );
    }

    #[test]
    fn test_rejects_capacity_bounds() {
        let config = TableConfig::default().with_initial_capacity(2);
        assert!(config.validate().is_err());

        let config = TableConfig::default().with_initial_capacity(64).with_max_capacity(32);
        assert!(config.validate().is_err());

        let config = TableConfig::default().with_max_capacity(MAD_PRIME + 1);
        assert!(config.validate().is_err());
    }
}
