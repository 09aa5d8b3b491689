//! Persistent (immutable) hash map with bucketed collision handling.
//!
//! This module provides [`PersistentMap`], an immutable hash map that
//! stores its entries in hash buckets of persistent [`List`]s and rebuilds
//! the bucket table on every mutation.
//!
//! # Overview
//!
//! The map optimizes for safe sharing, not for write throughput:
//!
//! - O(1) expected `get` and `contains_key`
//! - O(n) `updated`, `removed` and `filter` — each mutation collects a
//!   brand-new table from the existing pairs plus the delta
//! - O(1) `len` and `is_empty`
//!
//! Because no table is ever mutated in place, any number of map values may
//! share bucket lists and be handed around freely.
//!
//! # Hash contract
//!
//! Keys participate through the [`HashKey`] trait: two keys with equal
//! [`hash_value`](HashKey::hash_value) share a bucket, and identity within
//! the bucket is decided by [`key_equals`](HashKey::key_equals) — never by
//! the hash value alone, so collisions cannot conflate distinct keys. Each
//! bucket holds at most one entry per logical key.
//!
//! # Ordering
//!
//! Iteration follows the table order: buckets in first-seen-hash order,
//! and within a bucket the most recently written entry first. The absolute
//! order is implementation-defined but stable for the lifetime of one map
//! value.
//!
//! # Examples
//!
//! ```rust
//! use rivulet::persistent::PersistentMap;
//!
//! let map = PersistentMap::new()
//!     .updated("one", 1)
//!     .updated("two", 2)
//!     .updated("three", 3);
//!
//! assert_eq!(map.get(&"one"), Some(&1));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.updated("one", 100);
//! assert_eq!(map.get(&"one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get(&"one"), Some(&100)); // New version
//! ```

use std::collections::HashMap as BucketTable;
use std::collections::hash_map::Entry;
use std::fmt;
use std::iter::FromIterator;

use super::{List, ListIterator, ReferenceCounter};
use crate::hash::HashKey;

// =============================================================================
// Table Definition
// =============================================================================

/// The immutable bucket table behind a map value.
///
/// `buckets` maps a hash value to its bucket: a persistent list of pairs
/// with no two keys that are `key_equals` to each other. `order` records
/// the hash values in first-seen order and drives iteration. A hash
/// present in `order` always owns a non-empty bucket.
struct Table<K, V> {
    buckets: BucketTable<u64, List<(K, V)>>,
    order: Vec<u64>,
}

impl<K, V> Table<K, V> {
    fn empty() -> Self {
        Self {
            buckets: BucketTable::new(),
            order: Vec::new(),
        }
    }
}

// =============================================================================
// PersistentMap Definition
// =============================================================================

/// A persistent (immutable) hash map.
///
/// `PersistentMap` is an immutable data structure that rebuilds its bucket
/// table on every mutation, sharing the table of the original value
/// untouched.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | expected O(1)     |
/// | `updated`      | O(n)              |
/// | `removed`      | O(n)              |
/// | `filter`       | O(n)              |
/// | `contains_key` | expected O(1)     |
/// | `len`          | O(1)              |
/// | `is_empty`     | O(1)              |
///
/// # Examples
///
/// ```rust
/// use rivulet::persistent::PersistentMap;
///
/// let map = PersistentMap::singleton("key", 42);
/// assert_eq!(map.get(&"key"), Some(&42));
/// ```
pub struct PersistentMap<K, V> {
    /// The shared, immutable bucket table.
    table: ReferenceCounter<Table<K, V>>,
    /// Number of entries.
    length: usize,
}

impl<K, V> PersistentMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map: PersistentMap<String, i32> = PersistentMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: ReferenceCounter::new(Table::empty()),
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns an iterator over `(&key, &value)` pairs in table order.
    ///
    /// Table order is first-seen-hash bucket order, newest entry first
    /// within a bucket; it is stable for the lifetime of this map value.
    #[inline]
    pub fn iter(&self) -> PersistentMapIterator<'_, K, V> {
        PersistentMapIterator {
            table: &self.table,
            order_position: 0,
            bucket: None,
        }
    }

    /// Returns an iterator over references to the keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over references to the values, in table order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: HashKey, V> PersistentMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// Locates the key's bucket by hash value, then scans the bucket for
    /// an entry whose key is [`key_equals`](HashKey::key_equals) to the
    /// requested one. Absence is `None`, never an error.
    ///
    /// # Complexity
    ///
    /// O(bucket length), expected O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map = PersistentMap::new().updated("hello", 42);
    /// assert_eq!(map.get(&"hello"), Some(&42));
    /// assert_eq!(map.get(&"world"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = key.hash_value();
        self.table
            .buckets
            .get(&hash)?
            .iter()
            .find(|(candidate, _)| candidate.key_equals(key))
            .map(|(_, value)| value)
    }

    /// Returns `true` if the map contains an entry for the key.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

impl<K: HashKey + Clone, V: Clone> PersistentMap<K, V> {
    /// Creates a map containing a single entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map = PersistentMap::singleton("key", 42);
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::collect(std::iter::once((key, value)))
    }

    /// Builds a map from a finite source of pairs.
    ///
    /// Pairs are processed in source order: each pair's bucket is located
    /// (or created), any existing entry with an equal key is removed, and
    /// the new pair is prepended. The net effect is **last write wins**
    /// for duplicate keys, with the most recently written entry closest to
    /// the bucket head.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map = PersistentMap::collect(vec![("a", 1), ("b", 2), ("a", 3)]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&"a"), Some(&3));
    /// ```
    #[must_use]
    pub fn collect<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut buckets: BucketTable<u64, Vec<(K, V)>> = BucketTable::new();
        let mut order: Vec<u64> = Vec::new();
        let mut length: usize = 0;

        for (key, value) in pairs {
            let hash = key.hash_value();
            let bucket = match buckets.entry(hash) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => {
                    order.push(hash);
                    vacant.insert(Vec::new())
                }
            };
            if let Some(position) = bucket
                .iter()
                .position(|(existing, _)| existing.key_equals(&key))
            {
                bucket.remove(position);
                length -= 1;
            }
            // Newest entry at the bucket head.
            bucket.insert(0, (key, value));
            length += 1;
        }

        let buckets = buckets
            .into_iter()
            .map(|(hash, entries)| (hash, entries.into_iter().collect::<List<(K, V)>>()))
            .collect();

        Self {
            table: ReferenceCounter::new(Table { buckets, order }),
            length,
        }
    }

    /// Returns a new map with the entry for `key` set to `value`.
    ///
    /// Equivalent to re-collecting the existing pairs followed by the new
    /// one; the original map is untouched.
    ///
    /// # Complexity
    ///
    /// O(n) — the table is rebuilt
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map = PersistentMap::new().updated("k", 1);
    /// let updated = map.updated("k", 2);
    /// assert_eq!(map.get(&"k"), Some(&1));
    /// assert_eq!(updated.get(&"k"), Some(&2));
    /// ```
    #[must_use]
    pub fn updated(&self, key: K, value: V) -> Self {
        Self::collect(
            self.iter()
                .map(|(existing_key, existing_value)| {
                    (existing_key.clone(), existing_value.clone())
                })
                .chain(std::iter::once((key, value))),
        )
    }

    /// Returns a new map without any entry for `key`.
    ///
    /// Removing an absent key is a no-op: the result is observationally
    /// equal to the original map.
    ///
    /// # Complexity
    ///
    /// O(n) — the table is rebuilt
    #[must_use]
    pub fn removed(&self, key: &K) -> Self {
        Self::collect(
            self.iter()
                .filter(|(existing_key, _)| !existing_key.key_equals(key))
                .map(|(existing_key, existing_value)| {
                    (existing_key.clone(), existing_value.clone())
                }),
        )
    }

    /// Returns a new map keeping only the entries that satisfy the
    /// predicate.
    ///
    /// # Complexity
    ///
    /// O(n) — the table is rebuilt
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentMap;
    ///
    /// let map = PersistentMap::collect(vec![("a", 1), ("b", 2), ("c", 3)]);
    /// let filtered = map.filter(|_, value| value % 2 == 1);
    /// assert_eq!(filtered.len(), 2);
    /// assert_eq!(filtered.get(&"b"), None);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        Self::collect(
            self.iter()
                .filter(|&(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            length: self.length,
        }
    }
}

impl<K, V> Default for PersistentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HashKey + Clone, V: Clone> FromIterator<(K, V)> for PersistentMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::collect(pairs)
    }
}

impl<K: HashKey + Clone, V: Clone> Extend<(K, V)> for PersistentMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        *self = Self::collect(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .chain(pairs),
        );
    }
}

impl<K: HashKey, V: PartialEq> PartialEq for PersistentMap<K, V> {
    /// Observational equality: same length and the same value for every
    /// key, regardless of table order.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: HashKey, V: Eq> Eq for PersistentMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for PersistentMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over `(&key, &value)` pairs of a [`PersistentMap`].
///
/// Created by [`PersistentMap::iter`]. Yields buckets in first-seen-hash
/// order and bucket entries newest first.
pub struct PersistentMapIterator<'a, K, V> {
    table: &'a Table<K, V>,
    order_position: usize,
    bucket: Option<ListIterator<'a, (K, V)>>,
}

impl<'a, K, V> Iterator for PersistentMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = &mut self.bucket {
                if let Some((key, value)) = bucket.next() {
                    return Some((key, value));
                }
            }
            let hash = self.table.order.get(self.order_position)?;
            self.order_position += 1;
            self.bucket = self.table.buckets.get(hash).map(List::iter);
        }
    }
}

/// An owning iterator over the entries of a [`PersistentMap`].
///
/// Created by [`PersistentMap::into_iter`]. Entries are cloned out of the
/// shared table, since other map values may still reference it.
pub struct PersistentMapIntoIterator<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for PersistentMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

impl<K: Clone, V: Clone> IntoIterator for PersistentMap<K, V> {
    type Item = (K, V);
    type IntoIter = PersistentMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        PersistentMapIntoIterator {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::hash::{Hash, Hasher};

    /// A key type whose every value hashes to the same bucket while
    /// equality still distinguishes values.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Colliding(u32);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            0_u64.hash(state);
        }
    }

    #[rstest]
    fn test_new_is_empty() {
        let map: PersistentMap<String, i32> = PersistentMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[rstest]
    fn test_collect_last_write_wins() {
        let map = PersistentMap::collect(vec![("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&3));
        assert_eq!(map.get(&"b"), Some(&2));
    }

    #[rstest]
    fn test_updated_does_not_modify_original() {
        let map = PersistentMap::new().updated("k", 1);
        let updated = map.updated("k", 2);
        assert_eq!(map.get(&"k"), Some(&1));
        assert_eq!(updated.get(&"k"), Some(&2));
        assert_eq!(map.len(), 1);
        assert_eq!(updated.len(), 1);
    }

    #[rstest]
    fn test_removed_absent_key_is_noop() {
        let map = PersistentMap::collect(vec![("a", 1), ("b", 2)]);
        let removed = map.removed(&"missing");
        assert_eq!(map, removed);
    }

    #[rstest]
    fn test_colliding_keys_do_not_conflate() {
        let map = PersistentMap::new()
            .updated(Colliding(1), "one")
            .updated(Colliding(2), "two");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Colliding(1)), Some(&"one"));
        assert_eq!(map.get(&Colliding(2)), Some(&"two"));
    }

    #[rstest]
    fn test_colliding_bucket_holds_one_entry_per_key() {
        let map = PersistentMap::new()
            .updated(Colliding(1), 10)
            .updated(Colliding(1), 20)
            .updated(Colliding(2), 30);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Colliding(1)), Some(&20));
    }

    #[rstest]
    fn test_bucket_order_is_newest_first() {
        let map = PersistentMap::collect(vec![
            (Colliding(1), 1),
            (Colliding(2), 2),
            (Colliding(3), 3),
        ]);
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[rstest]
    fn test_filter_always_true_is_identity() {
        let map = PersistentMap::collect(vec![("a", 1), ("b", 2), ("c", 3)]);
        let filtered = map.filter(|_, _| true);
        assert_eq!(map, filtered);
    }

    #[rstest]
    fn test_iteration_order_is_stable_within_instance() {
        let map = PersistentMap::collect((0..32).map(|index| (index, index * 10)));
        let first_pass: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let second_pass: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(first_pass, second_pass);
    }

    #[rstest]
    fn test_display_and_debug() {
        let map = PersistentMap::singleton("a", 1);
        assert_eq!(format!("{map}"), "{a: 1}");
        assert_eq!(format!("{map:?}"), "{\"a\": 1}");
    }
}
