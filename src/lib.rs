//! # rivulet
//!
//! Persistent collections and lazy pull-based streams.
//!
//! ## Overview
//!
//! This library provides two closely related families of types:
//!
//! - **Persistent Data Structures**: an immutable singly-linked [`List`]
//!   (with a [`NonEmptyList`] variant), a bucketed [`PersistentMap`] with a
//!   customizable hash/equality contract, and a [`PersistentSet`] built on
//!   top of it. Every "mutation" returns a new value; unmodified structure
//!   is shared, never copied.
//! - **Lazy Streams**: a one-shot, pull-based [`Stream`] with a large
//!   combinator algebra (map, filter, zip, chunks, group-adjacent, …).
//!   Each stream may be consumed at most once; a second fork or drain is a
//!   programming error reported immediately.
//!
//! Absent values are modeled with [`Option`] throughout: map lookups, empty
//! folds and unmatched searches return `None` rather than raising an error.
//!
//! ## Feature Flags
//!
//! - `persistent`: persistent data structures (default)
//! - `stream`: the lazy stream engine (default, implies `persistent`)
//! - `arc`: share structure with `Arc` instead of `Rc`
//! - `fxhash`: hash map keys with `rustc-hash`
//! - `ahash`: hash map keys with `ahash`
//!
//! ## Example
//!
//! ```rust
//! use rivulet::prelude::*;
//!
//! let map = PersistentMap::new().updated("one", 1).updated("two", 2);
//! assert_eq!(map.get(&"one"), Some(&1));
//!
//! let doubled = Stream::emits([1, 2, 3]).map(|x| x * 2).to_vec();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```
//!
//! [`List`]: persistent::List
//! [`NonEmptyList`]: persistent::NonEmptyList
//! [`PersistentMap`]: persistent::PersistentMap
//! [`PersistentSet`]: persistent::PersistentSet
//! [`Stream`]: stream::Stream

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use rivulet::prelude::*;
/// ```
pub mod prelude {

    pub use crate::error::*;

    pub use crate::hash::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;
}

pub mod error;

pub mod hash;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "stream")]
pub mod stream;
