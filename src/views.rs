//! Iteration views over a [`HashTable`](crate::HashTable)
//!
//! Each view is a single fresh pass over the bucket store as it was when the view was created;
//! the table cannot change while a view borrows it.

use std::{iter::FusedIterator, slice};

use crate::table::{Chain, Entry};

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not yet visited
    buckets: slice::Iter<'a, Option<Chain<K, V>>>,
    /// Remainder of the chain being walked
    chain: slice::Iter<'a, Entry<K, V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Starts a pass over `buckets`, which hold `len` entries in total
    pub(crate) fn new(buckets: &'a [Option<Chain<K, V>>], len: usize) -> Self {
        Self { buckets: buckets.iter(), chain: slice::Iter::default(), remaining: len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.as_ref().map(|chain| chain.iter()).unwrap_or_default();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of the table
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    /// Underlying pair iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    /// Projects `inner` onto its keys
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of the table
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    /// Underlying pair iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    /// Projects `inner` onto its values
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Iterator over mutable references to the values of the table.
///
/// Keys are never exposed mutably, so entries cannot move to a different slot.
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    /// Slots not yet visited
    buckets: slice::IterMut<'a, Option<Chain<K, V>>>,
    /// Remainder of the chain being walked
    chain: slice::IterMut<'a, Entry<K, V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    /// Starts a pass over `buckets`, which hold `len` entries in total
    pub(crate) fn new(buckets: &'a mut [Option<Chain<K, V>>], len: usize) -> Self {
        Self { buckets: buckets.iter_mut(), chain: slice::IterMut::default(), remaining: len }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&mut entry.value);
            }
            self.chain =
                self.buckets.next()?.as_mut().map(|chain| chain.iter_mut()).unwrap_or_default();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
