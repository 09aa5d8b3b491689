//! Persistent (immutable) data structures.
//!
//! This module provides immutable data structures that use structural
//! sharing to minimize copying:
//!
//! - [`List`]: persistent singly-linked list (Cons/Nil)
//! - [`NonEmptyList`]: a list that is guaranteed to hold at least one element
//! - [`PersistentMap`]: persistent hash map with bucketed collision handling
//! - [`PersistentSet`]: persistent hash set built on [`PersistentMap`]
//!
//! # Structural Sharing
//!
//! Every "mutation" returns a new value. Where possible the new value
//! shares unmodified substructure with the original: `cons` shares the
//! entire tail, and map buckets that a rebuild leaves untouched share their
//! entry lists. Sharing is safe precisely because nothing is ever mutated
//! after construction.
//!
//! The map deliberately trades write throughput for simplicity of sharing:
//! `updated`, `removed` and `filter` rebuild the whole table in O(n). The
//! list is the cheap end of the spectrum with O(1) `cons`/`head`/`tail`.
//!
//! # Examples
//!
//! ## `List`
//!
//! ```rust
//! use rivulet::persistent::List;
//!
//! let list = List::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list
//! ```
//!
//! ## `PersistentMap`
//!
//! ```rust
//! use rivulet::persistent::PersistentMap;
//!
//! let map = PersistentMap::new()
//!     .updated("one", 1)
//!     .updated("two", 2);
//! assert_eq!(map.get(&"one"), Some(&1));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.updated("one", 100);
//! assert_eq!(map.get(&"one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get(&"one"), Some(&100)); // New version
//! ```
//!
//! ## `PersistentSet`
//!
//! ```rust
//! use rivulet::persistent::PersistentSet;
//!
//! let set: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
//! let other: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(set.union(&other).len(), 4);        // {1, 2, 3, 4}
//! assert_eq!(set.intersection(&other).len(), 2); // {2, 3}
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod list;
mod map;
mod non_empty;
mod set;

pub use list::List;
pub use list::ListIntoIterator;
pub use list::ListIterator;
pub use map::PersistentMap;
pub use map::PersistentMapIntoIterator;
pub use map::PersistentMapIterator;
pub use non_empty::NonEmptyList;
pub use set::PersistentSet;
pub use set::PersistentSetIterator;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(*reference_counter, *reference_counter_clone);
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
