//! Property-based laws for the persistent hash map and set.

use proptest::prelude::*;
use rivulet::persistent::{PersistentMap, PersistentSet};
use std::collections::{HashMap, HashSet};

proptest! {
    /// The map agrees with `std::collections::HashMap` on every lookup,
    /// including last-write-wins on duplicate keys.
    #[test]
    fn law_agrees_with_std_hashmap(entries in proptest::collection::vec((0u8..32, any::<i32>()), 0..64)) {
        let map = PersistentMap::collect(entries.clone());
        let reference: HashMap<u8, i32> = entries.into_iter().collect();
        prop_assert_eq!(map.len(), reference.len());
        for (key, value) in &reference {
            prop_assert_eq!(map.get(key), Some(value));
        }
        for (key, value) in map.iter() {
            prop_assert_eq!(reference.get(key), Some(value));
        }
    }

    /// `updated` leaves the original observationally intact.
    #[test]
    fn law_updated_is_persistent(
        entries in proptest::collection::vec((0u8..32, any::<i32>()), 0..32),
        key in 0u8..32,
        value in any::<i32>(),
    ) {
        let map = PersistentMap::collect(entries);
        let snapshot: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let updated = map.updated(key, value);
        prop_assert_eq!(updated.get(&key), Some(&value));
        let after: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(after, snapshot);
    }

    /// `removed` then `get` is `None`, and no other entry is disturbed.
    #[test]
    fn law_removed_removes_exactly_one_key(
        entries in proptest::collection::vec((0u8..32, any::<i32>()), 0..32),
        key in 0u8..32,
    ) {
        let map = PersistentMap::collect(entries);
        let removed = map.removed(&key);
        prop_assert_eq!(removed.get(&key), None);
        for (existing, value) in map.iter() {
            if *existing != key {
                prop_assert_eq!(removed.get(existing), Some(value));
            }
        }
    }

    /// Set membership agrees with `std::collections::HashSet`.
    #[test]
    fn law_set_agrees_with_std_hashset(elements in proptest::collection::vec(0u8..32, 0..64)) {
        let set = PersistentSet::collect(elements.clone());
        let reference: HashSet<u8> = elements.into_iter().collect();
        prop_assert_eq!(set.len(), reference.len());
        for element in 0u8..32 {
            prop_assert_eq!(set.contains(&element), reference.contains(&element));
        }
    }

    /// Union is the membership-wise or; intersection the and; difference
    /// the and-not.
    #[test]
    fn law_set_algebra(
        left in proptest::collection::vec(0u8..16, 0..32),
        right in proptest::collection::vec(0u8..16, 0..32),
    ) {
        let left_set = PersistentSet::collect(left);
        let right_set = PersistentSet::collect(right);
        let union = left_set.union(&right_set);
        let intersection = left_set.intersection(&right_set);
        let difference = left_set.difference(&right_set);
        for element in 0u8..16 {
            let in_left = left_set.contains(&element);
            let in_right = right_set.contains(&element);
            prop_assert_eq!(union.contains(&element), in_left || in_right);
            prop_assert_eq!(intersection.contains(&element), in_left && in_right);
            prop_assert_eq!(difference.contains(&element), in_left && !in_right);
        }
    }
}
