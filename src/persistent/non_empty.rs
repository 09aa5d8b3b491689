//! A persistent list that is guaranteed to hold at least one element.
//!
//! [`NonEmptyList`] wraps [`List`] and enforces non-emptiness at
//! construction time: collecting from an empty source is the one place in
//! the crate where an "empty collection" contract violation is raised.
//! In exchange, `first` and `rest` are infallible.

use std::fmt;

use super::List;
use crate::error::EmptyCollectionError;

/// A persistent singly-linked list with at least one element.
///
/// # Examples
///
/// ```rust
/// use rivulet::persistent::NonEmptyList;
///
/// let list = NonEmptyList::collect(1..=3).unwrap();
/// assert_eq!(*list.first(), 1);
/// assert_eq!(list.len(), 3);
///
/// assert!(NonEmptyList::<i32>::collect(std::iter::empty()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NonEmptyList<T> {
    /// Invariant: never empty.
    list: List<T>,
}

impl<T> NonEmptyList<T> {
    /// Builds a non-empty list from a finite source, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the source yields no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::persistent::NonEmptyList;
    ///
    /// let list = NonEmptyList::collect(vec!["a", "b"]).unwrap();
    /// assert_eq!(*list.first(), "a");
    /// ```
    pub fn collect<I: IntoIterator<Item = T>>(source: I) -> Result<Self, EmptyCollectionError> {
        let list: List<T> = source.into_iter().collect();
        if list.is_empty() {
            Err(EmptyCollectionError {
                collection_name: "NonEmptyList",
            })
        } else {
            Ok(Self { list })
        }
    }

    /// Creates a non-empty list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            list: List::singleton(element),
        }
    }

    /// Prepends an element, sharing the existing structure.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            list: self.list.cons(element),
        }
    }

    /// Returns a reference to the first element.
    ///
    /// Never fails: non-emptiness is established at construction.
    #[must_use]
    pub fn first(&self) -> &T {
        match self.list.head() {
            Some(element) => element,
            None => unreachable!("NonEmptyList invariant: the inner list is never empty"),
        }
    }

    /// Returns everything after the first element, as a possibly-empty
    /// [`List`].
    #[inline]
    #[must_use]
    pub fn rest(&self) -> List<T> {
        self.list.tail()
    }

    /// Returns the number of elements (always at least 1).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> super::ListIterator<'_, T> {
        self.list.iter()
    }

    /// Discards the non-emptiness guarantee, returning the inner list.
    #[inline]
    #[must_use]
    pub fn into_list(self) -> List<T> {
        self.list
    }
}

impl<T> TryFrom<List<T>> for NonEmptyList<T> {
    type Error = EmptyCollectionError;

    fn try_from(list: List<T>) -> Result<Self, Self::Error> {
        if list.is_empty() {
            Err(EmptyCollectionError {
                collection_name: "NonEmptyList",
            })
        } else {
            Ok(Self { list })
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NonEmptyList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, formatter)
    }
}

impl<T: fmt::Display> fmt::Display for NonEmptyList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, formatter)
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyList<T> {
    type Item = &'a T;
    type IntoIter = super::ListIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_collect_rejects_empty_source() {
        let result = NonEmptyList::<i32>::collect(std::iter::empty());
        let error = result.unwrap_err();
        assert_eq!(
            format!("{error}"),
            "NonEmptyList: cannot be collected from an empty source."
        );
    }

    #[rstest]
    fn test_collect_preserves_order() {
        let list = NonEmptyList::collect(1..=3).unwrap();
        let collected: Vec<i32> = list.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_first_and_rest() {
        let list = NonEmptyList::collect(vec![10, 20, 30]).unwrap();
        assert_eq!(*list.first(), 10);
        let rest: Vec<i32> = list.rest().iter().copied().collect();
        assert_eq!(rest, vec![20, 30]);
    }

    #[rstest]
    fn test_singleton_rest_is_empty() {
        let list = NonEmptyList::singleton(1);
        assert_eq!(list.len(), 1);
        assert!(list.rest().is_empty());
    }

    #[rstest]
    fn test_try_from_list() {
        let list: List<i32> = (1..=2).collect();
        assert!(NonEmptyList::try_from(list).is_ok());
        assert!(NonEmptyList::try_from(List::<i32>::new()).is_err());
    }
}
