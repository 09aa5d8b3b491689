//! The hash/equality contract used by the persistent map and set.
//!
//! Every key type participates in the map through the [`HashKey`] trait,
//! which exposes a 64-bit hash value and a key-equality predicate. A
//! blanket implementation covers any `Hash + Eq` type, so ordinary keys
//! work out of the box; a type customizes the contract by hand-implementing
//! `Hash` and `Eq` (the derived implementations are the structural
//! fallback).
//!
//! Two keys with equal hash values land in the same bucket, but identity is
//! always decided by [`HashKey::key_equals`], never by the hash value
//! alone, so a hash collision can never conflate distinct keys.
//!
//! # Hasher selection
//!
//! The hash function is selected at compile time:
//!
//! - default: `std::collections::hash_map::DefaultHasher`
//! - `fxhash` feature: `rustc_hash::FxHasher`
//! - `ahash` feature: `ahash::AHasher`
//!
//! All of them are deterministic within one process run, which is the
//! stability the map requires.

use std::hash::{Hash, Hasher};

/// Computes the 64-bit hash of a key with the feature-selected hasher.
#[cfg(all(feature = "fxhash", not(feature = "ahash")))]
pub(crate) fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes the 64-bit hash of a key with the feature-selected hasher.
#[cfg(feature = "ahash")]
pub(crate) fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = ahash::AHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes the 64-bit hash of a key using `DefaultHasher`.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// The hash/equality capability required of persistent map keys.
///
/// The contract has two obligations:
///
/// - [`hash_value`](Self::hash_value) must be deterministic: equal keys
///   must produce equal hash values.
/// - [`key_equals`](Self::key_equals) decides logical key identity. It is
///   consulted whenever two keys share a bucket, so hash collisions are
///   resolved by equality and never cause key confusion.
///
/// A blanket implementation is provided for every `K: Hash + Eq`; custom
/// semantics are expressed by implementing `Hash`/`Eq` by hand on the key
/// type.
///
/// # Examples
///
/// ```rust
/// use rivulet::hash::HashKey;
///
/// assert!(42_i32.key_equals(&42));
/// assert_eq!(7_i32.hash_value(), 7_i32.hash_value());
/// ```
pub trait HashKey {
    /// Returns the hash value of this key.
    ///
    /// Equal keys (in the sense of [`key_equals`](Self::key_equals)) must
    /// return equal hash values.
    fn hash_value(&self) -> u64;

    /// Returns `true` if `other` is the same logical key as `self`.
    fn key_equals(&self, other: &Self) -> bool;
}

impl<K: Hash + Eq> HashKey for K {
    #[inline]
    fn hash_value(&self) -> u64 {
        compute_hash(self)
    }

    #[inline]
    fn key_equals(&self, other: &Self) -> bool {
        self == other
    }
}
