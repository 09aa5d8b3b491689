//! Persistent (immutable) hash set.
//!
//! This module provides [`PersistentSet`], a thin wrapper over
//! [`PersistentMap`] with unit values. It inherits the map's hash/equality
//! contract, rebuild-on-mutation model and stable table iteration order.
//!
//! # Examples
//!
//! ```rust
//! use rivulet::persistent::PersistentSet;
//!
//! let set = PersistentSet::new().inserted(1).inserted(2).inserted(3);
//! assert!(set.contains(&1));
//!
//! // Structural sharing: the original set is preserved
//! let inserted = set.inserted(4);
//! assert_eq!(set.len(), 3);      // Original unchanged
//! assert_eq!(inserted.len(), 4); // New version
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::PersistentMap;
use crate::hash::HashKey;

/// A persistent (immutable) hash set.
///
/// Membership is decided by the element's [`HashKey`] contract, exactly as
/// for map keys. Every mutating operation rebuilds the underlying table
/// and leaves the original set untouched.
///
/// # Time Complexity
///
/// | Operation  | Complexity    |
/// |------------|---------------|
/// | `contains` | expected O(1) |
/// | `inserted` | O(n)          |
/// | `removed`  | O(n)          |
/// | `union`    | O(n + m)      |
/// | `len`      | O(1)          |
///
/// # Examples
///
/// ```rust
/// use rivulet::persistent::PersistentSet;
///
/// let set: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
/// assert!(set.contains(&2));
/// assert!(!set.contains(&9));
/// ```
pub struct PersistentSet<T> {
    map: PersistentMap<T, ()>,
}

impl<T> PersistentSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: PersistentMap::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over references to the elements, in table
    /// order.
    #[inline]
    pub fn iter(&self) -> PersistentSetIterator<'_, T> {
        PersistentSetIterator {
            entries: self.map.iter(),
        }
    }
}

impl<T: HashKey> PersistentSet<T> {
    /// Returns `true` if the set contains the element.
    ///
    /// # Complexity
    ///
    /// expected O(1)
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.map.contains_key(element)
    }
}

impl<T: HashKey + Clone> PersistentSet<T> {
    /// Creates a set containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            map: PersistentMap::singleton(element, ()),
        }
    }

    /// Builds a set from a finite source; duplicates collapse to one
    /// membership.
    #[must_use]
    pub fn collect<I: IntoIterator<Item = T>>(source: I) -> Self {
        Self {
            map: PersistentMap::collect(source.into_iter().map(|element| (element, ()))),
        }
    }

    /// Returns a new set also containing `element`.
    ///
    /// # Complexity
    ///
    /// O(n) — the table is rebuilt
    #[must_use]
    pub fn inserted(&self, element: T) -> Self {
        Self {
            map: self.map.updated(element, ()),
        }
    }

    /// Returns a new set without `element`. Removing an absent element is
    /// a no-op.
    ///
    /// # Complexity
    ///
    /// O(n) — the table is rebuilt
    #[must_use]
    pub fn removed(&self, element: &T) -> Self {
        Self {
            map: self.map.removed(element),
        }
    }

    /// Returns the union of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::PersistentSet;
    ///
    /// let left: PersistentSet<i32> = [1, 2].into_iter().collect();
    /// let right: PersistentSet<i32> = [2, 3].into_iter().collect();
    /// assert_eq!(left.union(&right).len(), 3);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::collect(self.iter().chain(other.iter()).cloned())
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::collect(
            self.iter()
                .filter(|element| other.contains(*element))
                .cloned(),
        )
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self::collect(
            self.iter()
                .filter(|element| !other.contains(*element))
                .cloned(),
        )
    }

    /// Returns `true` if every element of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|element| other.contains(element))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for PersistentSet<T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T> Default for PersistentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HashKey + Clone> FromIterator<T> for PersistentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(source: I) -> Self {
        Self::collect(source)
    }
}

impl<T: HashKey> PartialEq for PersistentSet<T> {
    /// Observational equality: same length and same memberships.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: HashKey> Eq for PersistentSet<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over references to the elements of a [`PersistentSet`].
///
/// Created by [`PersistentSet::iter`].
pub struct PersistentSetIterator<'a, T> {
    entries: super::PersistentMapIterator<'a, T, ()>,
}

impl<'a, T> Iterator for PersistentSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(element, _)| element)
    }
}

impl<'a, T> IntoIterator for &'a PersistentSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
