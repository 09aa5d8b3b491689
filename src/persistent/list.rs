//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`List`], an immutable cons-list that uses
//! structural sharing for efficient operations. It doubles as the bucket
//! storage of the persistent hash map.
//!
//! # Overview
//!
//! `List` is the classic `Nil | Cons(head, tail)` sequence:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head access
//! - O(1) tail access
//! - O(n) index access
//! - O(n) append and reverse
//!
//! All operations return new lists without modifying the original, and
//! traversal is restartable: iterating a list never consumes it, which
//! distinguishes it from the one-shot stream type.
//!
//! # Examples
//!
//! ```rust
//! use rivulet::persistent::List;
//!
//! // Build a list using cons
//! let list = List::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Build from an iterator; source order is preserved
//! let list: List<i32> = (1..=5).collect();
//! assert_eq!(list.head(), Some(&1));
//! ```
//!
//! # Structural Sharing
//!
//! When you create a new list by prepending an element with `cons`, the new
//! list shares all nodes with the original list:
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! This makes `cons` an O(1) operation both in time and additional space.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ReferenceCounter;
use crate::error::EmptySequenceError;

/// Internal node of the persistent list.
///
/// `Nil` is the shared empty sentinel; `Cons` holds one element and a
/// reference-counted rest. Once constructed a node never changes, so any
/// number of lists may share a common suffix.
enum Node<T> {
    /// The empty sequence.
    Nil,
    /// One element followed by the rest of the sequence.
    Cons {
        /// The element stored in this node.
        element: T,
        /// The rest of the sequence.
        rest: ReferenceCounter<Node<T>>,
    },
}

/// A persistent (immutable) singly-linked list.
///
/// `List` is an immutable data structure that uses structural sharing to
/// efficiently support functional programming patterns.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `get`     | O(n)       |
/// | `append`  | O(n)       |
/// | `reverse` | O(n)       |
///
/// # Examples
///
/// ```rust
/// use rivulet::persistent::List;
///
/// let list = List::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
pub struct List<T> {
    /// The first node of the list (`Nil` when empty).
    node: ReferenceCounter<Node<T>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> List<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            node: ReferenceCounter::new(Node::Nil),
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::singleton(42);
    /// assert_eq!(list.head(), Some(&42));
    /// assert_eq!(list.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a Vec, prepending onto an existing tail.
    ///
    /// Uses `Vec::pop()` to consume elements from the end, which is O(1),
    /// avoiding the need for reverse iteration. The result's head equals
    /// the Vec's first element; `tail` is shared, not copied.
    fn build_onto(mut elements: Vec<T>, tail: ReferenceCounter<Node<T>>, tail_length: usize) -> Self {
        let length = tail_length + elements.len();
        let mut node = tail;
        while let Some(element) = elements.pop() {
            node = ReferenceCounter::new(Node::Cons {
                element,
                rest: node,
            });
        }
        Self { node, length }
    }

    /// Prepends an element to the front of the list.
    ///
    /// This operation creates a new list with the element at the front,
    /// sharing the structure of the original list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            node: ReferenceCounter::new(Node::Cons {
                element,
                rest: self.node.clone(),
            }),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.head(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        match &*self.node {
            Node::Nil => None,
            Node::Cons { element, .. } => Some(element),
        }
    }

    /// Returns the list without its first element.
    ///
    /// If the list is empty, returns an empty list. The result shares
    /// structure with the original list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail();
    /// assert_eq!(tail.head(), Some(&2));
    /// assert_eq!(tail.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        match &*self.node {
            Node::Nil => Self::new(),
            Node::Cons { rest, .. } => Self {
                node: rest.clone(),
                length: self.length.saturating_sub(1),
            },
        }
    }

    /// Decomposes the list into its head and tail.
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(2).cons(1);
    /// if let Some((head, tail)) = list.uncons() {
    ///     assert_eq!(*head, 1);
    ///     assert_eq!(tail.head(), Some(&2));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        match &*self.node {
            Node::Nil => None,
            Node::Cons { element, rest } => Some((
                element,
                Self {
                    node: rest.clone(),
                    length: self.length.saturating_sub(1),
                },
            )),
        }
    }

    /// Returns a reference to the first element, treating emptiness as a
    /// contract violation.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySequenceError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::singleton(1);
    /// assert_eq!(list.try_head(), Ok(&1));
    ///
    /// let empty: List<i32> = List::new();
    /// assert!(empty.try_head().is_err());
    /// ```
    pub fn try_head(&self) -> Result<&T, EmptySequenceError> {
        self.head().ok_or(EmptySequenceError {
            method_name: "try_head",
        })
    }

    /// Returns the list without its first element, treating emptiness as a
    /// contract violation.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySequenceError`] if the list is empty.
    pub fn try_tail(&self) -> Result<Self, EmptySequenceError> {
        match &*self.node {
            Node::Nil => Err(EmptySequenceError {
                method_name: "try_tail",
            }),
            Node::Cons { rest, .. } => Ok(Self {
                node: rest.clone(),
                length: self.length.saturating_sub(1),
            }),
        }
    }

    /// Decomposes the list into head and tail, treating emptiness as a
    /// contract violation.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySequenceError`] if the list is empty.
    pub fn try_uncons(&self) -> Result<(&T, Self), EmptySequenceError> {
        self.uncons().ok_or(EmptySequenceError {
            method_name: "try_uncons",
        })
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(n) where n = index
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.get(0), Some(&1));
    /// assert_eq!(list.get(2), Some(&3));
    /// assert_eq!(list.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns an iterator over references to the elements.
    ///
    /// The iterator yields elements from front to back. Iteration is
    /// restartable and side-effect-free: it never consumes the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> ListIterator<'_, T> {
        ListIterator {
            current: &self.node,
        }
    }

    /// Finds the first element that satisfies the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.find(|element| *element > 3), Some(&4));
    /// assert_eq!(list.find(|element| *element > 9), None);
    /// ```
    #[must_use]
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|element| predicate(*element))
    }

    /// Folds the list from the left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// let sum = list.fold_left(0, |accumulator, element| accumulator + element);
    /// assert_eq!(sum, 10);
    /// ```
    pub fn fold_left<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        let mut accumulator = init;
        for element in self.iter() {
            accumulator = function(accumulator, element);
        }
        accumulator
    }

    /// Applies a function to every element, producing a new list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = (1..=3).collect();
    /// let doubled = list.map(|element| element * 2);
    /// let collected: Vec<i32> = doubled.iter().copied().collect();
    /// assert_eq!(collected, vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, mut function: F) -> List<U>
    where
        F: FnMut(&T) -> U,
    {
        let mapped: Vec<U> = self.iter().map(|element| function(element)).collect();
        List::build_onto(mapped, ReferenceCounter::new(Node::Nil), 0)
    }
}

impl<T: PartialEq> List<T> {
    /// Returns `true` if the list contains the given element.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<T: Clone> List<T> {
    /// Returns a new list with the elements in reverse order.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = (1..=3).collect();
    /// let reversed: Vec<i32> = list.reverse().iter().copied().collect();
    /// assert_eq!(reversed, vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::new();
        for element in self.iter() {
            reversed = reversed.cons(element.clone());
        }
        reversed
    }

    /// Appends another list to the end of this one.
    ///
    /// The result shares the entire structure of `other`; only the
    /// elements of `self` are copied.
    ///
    /// # Complexity
    ///
    /// O(len of self)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let left: List<i32> = (1..=2).collect();
    /// let right: List<i32> = (3..=4).collect();
    /// let joined: Vec<i32> = left.append(&right).iter().copied().collect();
    /// assert_eq!(joined, vec![1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        let elements: Vec<T> = self.iter().cloned().collect();
        Self::build_onto(elements, other.node.clone(), other.length)
    }

    /// Returns a new list keeping only the elements that satisfy the
    /// predicate. Source order is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::List;
    ///
    /// let list: List<i32> = (1..=6).collect();
    /// let even = list.filter(|element| element % 2 == 0);
    /// let collected: Vec<i32> = even.iter().copied().collect();
    /// assert_eq!(collected, vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let kept: Vec<T> = self
            .iter()
            .filter(|element| predicate(*element))
            .cloned()
            .collect();
        Self::build_onto(kept, ReferenceCounter::new(Node::Nil), 0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Builds a list preserving the source's order: the list's head is the
    /// source's first element.
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let elements: Vec<T> = iterable.into_iter().collect();
        Self::build_onto(elements, ReferenceCounter::new(Node::Nil), 0)
    }
}

impl<T: Clone> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        let appended: Self = iterable.into_iter().collect();
        *self = self.append(&appended);
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over references to the elements of a [`List`].
///
/// Created by [`List::iter`].
pub struct ListIterator<'a, T> {
    current: &'a Node<T>,
}

impl<'a, T> Iterator for ListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current {
            Node::Nil => None,
            Node::Cons { element, rest } => {
                self.current = rest;
                Some(element)
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = ListIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the elements of a [`List`].
///
/// Created by [`List::into_iter`]. Elements are cloned out of the shared
/// nodes, since other lists may still reference them.
pub struct ListIntoIterator<T> {
    remaining: List<T>,
}

impl<T: Clone> Iterator for ListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, rest) = match self.remaining.uncons() {
            None => return None,
            Some((element, rest)) => (element.clone(), rest),
        };
        self.remaining = rest;
        Some(element)
    }
}

impl<T: Clone> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = ListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        ListIntoIterator { remaining: self }
    }
}

// =============================================================================
// Tests
// =============================================================================
