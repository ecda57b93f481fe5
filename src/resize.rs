//! Load-factor driven capacity planning

use crate::{config::TableConfig, error::TableError, primes::primes_in};

/// Direction of a capacity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    /// Double the target capacity
    Up,
    /// Halve the target capacity, down to the floor
    Down,
}

/// Decides when a table must change capacity and which prime capacity it moves to.
///
/// Planning never touches the bucket store: callers compute the final capacity first and
/// rehash once, so a failed plan leaves the table unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    /// Growth threshold
    max_load_factor: f64,
    /// Shrink threshold
    min_load_factor: f64,
    /// Shrink floor
    min_capacity: usize,
    /// Prime search horizon cap
    max_capacity: usize,
}

impl ResizePolicy {
    /// Builds the policy described by `config`
    #[must_use]
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            max_load_factor: config.max_load_factor,
            min_load_factor: config.min_load_factor,
            min_capacity: config.min_capacity,
            max_capacity: config.max_capacity,
        }
    }

    /// Ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(len: usize, capacity: usize) -> f64 {
        len as f64 / capacity.max(1) as f64
    }

    /// Capacity a table holding `len` entries in `capacity` buckets must grow to, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when no prime capacity large enough can be found.
    pub fn grow_to(&self, len: usize, capacity: usize) -> Result<Option<usize>, TableError> {
        let mut planned = capacity;
        while Self::load_factor(len, planned) > self.max_load_factor {
            match self.next_capacity(Resize::Up, planned)? {
                Some(next) => planned = next,
                None => break,
            }
        }
        Ok((planned != capacity).then_some(planned))
    }

    /// Capacity a table holding `len` entries in `capacity` buckets should shrink to, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the prime search fails, which the prime gaps below the
    /// horizon rule out for every reachable capacity.
    pub fn shrink_to(&self, len: usize, capacity: usize) -> Result<Option<usize>, TableError> {
        let mut planned = capacity;
        while Self::load_factor(len, planned) < self.min_load_factor && planned > self.min_capacity
        {
            match self.next_capacity(Resize::Down, planned)? {
                // Never shrink into a store the next insert would have to grow again
                Some(next) if Self::load_factor(len, next) <= self.max_load_factor => {
                    planned = next;
                }
                _ => break,
            }
        }
        Ok((planned != capacity).then_some(planned))
    }

    /// One resize step from `capacity` in `direction`.
    ///
    /// The result is the smallest prime at or above the doubled (or halved) target. `None`
    /// means a shrink would not reduce the capacity, so the floor has been reached.
    ///
    /// # Errors
    ///
    /// [`TableError::CapacityOverflow`] if doubling overflows, and
    /// [`TableError::CapacityExhausted`] if no prime lies below the search horizon.
    pub fn next_capacity(
        &self,
        direction: Resize,
        capacity: usize,
    ) -> Result<Option<usize>, TableError> {
        let target = match direction {
            Resize::Up => capacity.checked_mul(2).ok_or(TableError::CapacityOverflow { capacity })?,
            Resize::Down => (capacity / 2).max(self.min_capacity),
        };
        let horizon = target.saturating_add(target.div_ceil(2)).min(self.max_capacity);

        let Some(prime) = primes_in(target, horizon).next() else {
            tracing::warn!(?direction, capacity, target, horizon, "no prime capacity in range");
            return Err(TableError::CapacityExhausted { target, horizon });
        };
        tracing::trace!(?direction, capacity, target, prime, "planned resize step");

        let moves = match direction {
            Resize::Up => prime > capacity,
            Resize::Down => prime < capacity,
        };
        Ok(moves.then_some(prime))
    }

    /// Shrink floor
    #[must_use]
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }
}
