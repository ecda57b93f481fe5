//! Multiply-add-divide (MAD) compression of hash codes into bucket indices

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Prime modulus of the MAD function. Capacities never exceed it.
pub const MAD_PRIME: usize = 109_345_121;

/// [`MAD_PRIME`] widened for the intermediate product
const MODULUS: u128 = 109_345_121;

/// Maps hash codes to bucket indices with `((hash * scale + shift) mod P) mod capacity`.
///
/// `scale` and `shift` are drawn once and stay fixed for the lifetime of the owning table,
/// across every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MadCompressor {
    /// Multiplier in `1..P`
    scale: u64,
    /// Offset in `0..P`
    shift: u64,
}

impl MadCompressor {
    /// Draws `scale` and `shift` from a generator seeded with `seed`, or from entropy
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::from_rng(&mut rng)
    }

    /// Draws `scale` and `shift` from the given random source
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let modulus = MAD_PRIME as u64;
        Self { scale: rng.random_range(1..modulus), shift: rng.random_range(0..modulus) }
    }

    /// Compresses `hash` into `0..capacity`. `capacity` must be non-zero.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn compress(&self, hash: u64, capacity: usize) -> usize {
        debug_assert!(capacity > 0);
        let mixed = u128::from(hash) * u128::from(self.scale) + u128::from(self.shift);
        // The result is below `capacity`, so narrowing back to usize is lossless
        ((mixed % MODULUS) % capacity.max(1) as u128) as usize
    }

    /// Hashes `key` and compresses the result into `0..capacity`
    #[must_use]
    pub fn index<Q: Hash + ?Sized>(&self, key: &Q, capacity: usize) -> usize {
        self.compress(hash_key(key), capacity)
    }

    /// Multiplier of the MAD function
    #[must_use]
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Offset of the MAD function
    #[must_use]
    pub fn shift(&self) -> u64 {
        self.shift
    }
}

/// Stable integer hash of a key: equal keys always hash equally
fn hash_key<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
