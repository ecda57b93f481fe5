use std::{borrow::Borrow, cmp::Ordering, hash::Hash, iter, mem};

use crate::{
    compressor::MadCompressor,
    config::TableConfig,
    error::TableError,
    resize::{Resize, ResizePolicy},
    views::{Iter, Keys, Values, ValuesMut},
};

/// A key-value pair owned by exactly one chain
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// Never changes once the entry is stored
    pub(crate) key: K,
    /// Replaced by upserts and reachable through `get_mut`
    pub(crate) value: V,
}

/// Entries sharing one compressed index, in no particular order
pub(crate) type Chain<K, V> = Vec<Entry<K, V>>;

/// A bucket store: one optional chain per slot. An empty slot is always `None`, never an
/// empty chain.
pub(crate) type Store<K, V> = Vec<Option<Chain<K, V>>>;

/// A hash table using separate chaining and randomized MAD compression.
///
/// Capacities are always prime. The table grows when its load factor exceeds the configured
/// maximum and shrinks when it drops below the minimum; each resize rehashes every entry into
/// a freshly allocated store before the old one is dropped.
///
/// Keys are compared through [`Ord`]: two keys address the same entry when they compare
/// [`Ordering::Equal`]. Their [`Hash`] must agree with that ordering.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    /// The bucket store; its length is the capacity
    buckets: Store<K, V>,
    /// Current number of entries across all chains
    size: usize,
    /// Key to slot mapping, fixed for the lifetime of the table
    compressor: MadCompressor,
    /// Grow and shrink thresholds
    policy: ResizePolicy,
    /// Capacity restored by `clear`
    initial_capacity: usize,
}

impl<K, V> Default for HashTable<K, V>
where
    K: Ord + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HashTable<K, V>
where
    K: Ord + Hash,
{
    /// Creates an empty table whose compression parameters come from entropy
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(&TableConfig::default())
    }

    /// Creates an empty table with a fixed compressor draw, for reproducible layouts
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_seed(1)
    }

    /// Creates an empty table whose compressor is drawn from `seed`
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(&TableConfig::default().with_seed(seed))
    }

    /// Creates an empty table from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    /// Builds the table; `config` must already be valid
    fn from_valid_config(config: &TableConfig) -> Self {
        Self {
            buckets: empty_store(config.initial_capacity),
            size: 0,
            compressor: MadCompressor::new(config.seed),
            policy: ResizePolicy::from_config(config),
            initial_capacity: config.initial_capacity,
        }
    }

    /// Slot of `key` in the live store
    fn index_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        self.compressor.index(key, self.buckets.len())
    }

    /// Chain addressed by `key`, if its slot is occupied
    fn chain_of<Q: Hash + ?Sized>(&self, key: &Q) -> Option<&Chain<K, V>> {
        self.buckets.get(self.index_of(key))?.as_ref()
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + Hash + ?Sized,
    {
        self.chain_of(key)?
            .iter()
            .find(|entry| entry.key.borrow().cmp(key) == Ordering::Equal)
            .map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key. The key itself stays immutable.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + Hash + ?Sized,
    {
        let index = self.index_of(key);
        self.buckets
            .get_mut(index)?
            .as_mut()?
            .iter_mut()
            .find(|entry| entry.key.borrow().cmp(key) == Ordering::Equal)
            .map(|entry| &mut entry.value)
    }

    /// Returns true if the table holds an entry for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + Hash + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`, replacing and returning any previous value.
    ///
    /// Replacing a value never resizes. Inserting a new key may grow the table; the new
    /// capacity is chosen before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the table needs to grow and no prime capacity is available. The
    /// table is left exactly as it was and `key` is not inserted.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        let growth = if self.contains_key(&key) {
            None
        } else {
            self.policy.grow_to(self.size.saturating_add(1), self.capacity())?
        };

        let previous = put_into(&mut self.buckets, &self.compressor, key, value);
        if previous.is_none() {
            self.size = self.size.saturating_add(1);
        }

        if let Some(capacity) = growth {
            self.rehash(Resize::Up, capacity);
        }
        Ok(previous)
    }

    /// Removes the entry for `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + Hash + ?Sized,
    {
        let index = self.index_of(key);
        let slot = self.buckets.get_mut(index)?;
        let chain = slot.as_mut()?;
        let position =
            chain.iter().position(|entry| entry.key.borrow().cmp(key) == Ordering::Equal)?;

        let entry = chain.swap_remove(position);
        if chain.is_empty() {
            *slot = None;
        }
        self.size = self.size.saturating_sub(1);

        if self.capacity() > self.policy.min_capacity() {
            match self.policy.shrink_to(self.size, self.capacity()) {
                Ok(Some(capacity)) => self.rehash(Resize::Down, capacity),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%error, capacity = self.capacity(), "keeping current capacity");
                    debug_assert!(false, "shrink planning failed: {error}");
                }
            }
        }

        Some(entry.value)
    }

    /// Moves every entry into a new store of `capacity` slots, then replaces the live store
    fn rehash(&mut self, direction: Resize, capacity: usize) {
        let mut store = empty_store(capacity);
        let entries = self.buckets.iter_mut().filter_map(Option::take).flatten();
        for Entry { key, value } in entries {
            let previous = put_into(&mut store, &self.compressor, key, value);
            debug_assert!(previous.is_none(), "rehash met a duplicate key");
        }

        tracing::debug!(
            ?direction,
            from = self.buckets.len(),
            to = capacity,
            size = self.size,
            "rehashed bucket store"
        );
        self.buckets = store;
    }

    /// Inserts every pair from `iter`, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the error of the first [`put`](Self::put) that fails. Pairs before it stay
    /// inserted.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Builds a table with an entropy-drawn compressor from key-value pairs
    ///
    /// # Errors
    ///
    /// Returns the error of the first [`put`](Self::put) that fails.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::new();
        table.try_extend(iter)?;
        Ok(table)
    }

    /// Clears the table, removing all entries and returning to the initial capacity
    pub fn clear(&mut self) {
        self.buckets = empty_store(self.initial_capacity);
        self.size = 0;
    }
}

impl<K, V> HashTable<K, V> {
    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the table
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        ResizePolicy::load_factor(self.size, self.buckets.len())
    }

    /// Returns an iterator over the key-value pairs, in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.size)
    }

    /// Same as [`iter`](Self::iter)
    #[must_use]
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Returns an iterator over the keys
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable references to the values
    #[must_use]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(&mut self.buckets, self.size)
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Allocates `capacity` empty slots
fn empty_store<K, V>(capacity: usize) -> Store<K, V> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Upserts into `store`, which may be the live store or one being filled by a rehash.
///
/// Returns the replaced value, or `None` if a new entry was appended.
#[allow(clippy::indexing_slicing)]
fn put_into<K: Ord + Hash, V>(
    store: &mut [Option<Chain<K, V>>],
    compressor: &MadCompressor,
    key: K,
    value: V,
) -> Option<V> {
    // compress() always returns an index below store.len()
    let chain = store[compressor.index(&key, store.len())].get_or_insert_with(Vec::new);
    if let Some(entry) = chain.iter_mut().find(|entry| entry.key.cmp(&key) == Ordering::Equal) {
        return Some(mem::replace(&mut entry.value, value));
    }
    chain.push(Entry { key, value });
    None
}
