//! Integration tests for the persistent `List` and `NonEmptyList`.

use rivulet::persistent::{List, NonEmptyList};
use rstest::rstest;

// =============================================================================
// Construction and Access
// =============================================================================

#[rstest]
fn test_new_list_is_empty() {
    let list: List<i32> = List::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.head(), None);
    assert!(list.tail().is_empty());
}

#[rstest]
fn test_cons_prepends() {
    let list = List::new().cons(3).cons(2).cons(1);
    assert_eq!(list.len(), 3);
    assert_eq!(list.head(), Some(&1));
    assert_eq!(list.tail().head(), Some(&2));
}

#[rstest]
fn test_get_by_index() {
    let list: List<i32> = (1..=5).collect();
    assert_eq!(list.get(0), Some(&1));
    assert_eq!(list.get(4), Some(&5));
    assert_eq!(list.get(5), None);
}

#[rstest]
fn test_from_iterator_preserves_order() {
    let list: List<i32> = vec![1, 2, 3].into_iter().collect();
    let collected: Vec<i32> = list.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3]);
}

// =============================================================================
// Checked Access
// =============================================================================

#[rstest]
fn test_try_head_on_empty_reports_method() {
    let list: List<i32> = List::new();
    let error = list.try_head().unwrap_err();
    assert!(error.to_string().contains("try_head"));
    assert!(error.to_string().contains("empty"));
}

#[rstest]
fn test_try_uncons_splits() {
    let list: List<i32> = (1..=3).collect();
    let (head, tail) = list.try_uncons().unwrap();
    assert_eq!(head, &1);
    assert_eq!(tail.len(), 2);
}

// =============================================================================
// Persistence
// =============================================================================

#[rstest]
fn test_cons_shares_tail_structurally() {
    let shared: List<i32> = (1..=3).collect();
    let extended = shared.cons(0);
    // The original is observationally unchanged.
    assert_eq!(shared.len(), 3);
    assert_eq!(extended.len(), 4);
    assert_eq!(extended.tail(), shared);
}

#[rstest]
fn test_append_does_not_modify_operands() {
    let left: List<i32> = (1..=2).collect();
    let right: List<i32> = (3..=4).collect();
    let joined = left.append(&right);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 2);
    let collected: Vec<i32> = joined.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3, 4]);
}

// =============================================================================
// Transformation
// =============================================================================

#[rstest]
fn test_map_preserves_order_and_length() {
    let list: List<i32> = (1..=4).collect();
    let doubled = list.map(|element| element * 2);
    let collected: Vec<i32> = doubled.iter().copied().collect();
    assert_eq!(collected, vec![2, 4, 6, 8]);
}

#[rstest]
fn test_filter_keeps_relative_order() {
    let list: List<i32> = (1..=6).collect();
    let even = list.filter(|element| element % 2 == 0);
    let collected: Vec<i32> = even.iter().copied().collect();
    assert_eq!(collected, vec![2, 4, 6]);
}

#[rstest]
fn test_fold_left_runs_front_to_back() {
    let list: List<&str> = vec!["a", "b", "c"].into_iter().collect();
    let joined = list.fold_left(String::new(), |accumulator, element| accumulator + *element);
    assert_eq!(joined, "abc");
}

#[rstest]
fn test_reverse() {
    let list: List<i32> = (1..=3).collect();
    let collected: Vec<i32> = list.reverse().iter().copied().collect();
    assert_eq!(collected, vec![3, 2, 1]);
}

#[rstest]
fn test_find_returns_first_match() {
    let list: List<i32> = (1..=6).collect();
    assert_eq!(list.find(|element| element % 3 == 0), Some(&3));
    assert_eq!(list.find(|element| *element > 100), None);
}

// =============================================================================
// Display and Equality
// =============================================================================

#[rstest]
fn test_display_format() {
    let list: List<i32> = (1..=3).collect();
    assert_eq!(list.to_string(), "[1, 2, 3]");
    let empty: List<i32> = List::new();
    assert_eq!(empty.to_string(), "[]");
}

#[rstest]
fn test_equality_is_elementwise() {
    let left: List<i32> = (1..=3).collect();
    let right: List<i32> = vec![1, 2, 3].into_iter().collect();
    assert_eq!(left, right);
    assert_ne!(left, right.cons(0));
}

// =============================================================================
// NonEmptyList
// =============================================================================

#[rstest]
fn test_non_empty_collect_rejects_empty_source() {
    let error = NonEmptyList::<i32>::collect(std::iter::empty()).unwrap_err();
    assert!(error.to_string().contains("NonEmptyList"));
    assert!(error.to_string().contains("empty"));
}

#[rstest]
fn test_non_empty_first_is_total() {
    let list = NonEmptyList::collect(vec![7, 8, 9]).unwrap();
    assert_eq!(*list.first(), 7);
    assert_eq!(list.len(), 3);
}

#[rstest]
fn test_non_empty_cons_keeps_invariant() {
    let list = NonEmptyList::singleton(2).cons(1);
    assert_eq!(*list.first(), 1);
    assert_eq!(list.rest().len(), 1);
}

#[rstest]
fn test_non_empty_try_from_list() {
    let source: List<i32> = (1..=2).collect();
    let list = NonEmptyList::try_from(source).unwrap();
    assert_eq!(list.len(), 2);

    let empty: List<i32> = List::new();
    assert!(NonEmptyList::try_from(empty).is_err());
}
