//! Pluggable-comparator seam for the host storage engine.
//!
//! LSM engines such as LevelDB accept a custom comparator as three
//! operations: compare two keys, name the ordering, and tear down comparator
//! state. [`KeyComparator`] is the Rust shape of that contract;
//! [`crate::ffi`] turns any implementation into the engine's C callbacks.
//!
//! # Identity
//!
//! The engine records the comparator's name next to the data written with
//! it and refuses to reopen a database whose recorded name differs. The
//! name is therefore part of the on-disk format: [`COMPARATOR_NAME`] must
//! change whenever [`crate::order`] changes, and must not change otherwise.
//!
//! # Concurrency
//!
//! The engine calls `compare` from foreground reads and background
//! compactions at the same time. Implementations are `Send + Sync`;
//! [`SampleKeyComparator`] holds no state at all.

use std::cmp::Ordering;
use std::ffi::CStr;

use crate::key::SampleKey;
use crate::order::order;

/// Name under which the storage engine records this ordering.
pub const COMPARATOR_NAME: &str = "SampleKeyComparator";

/// [`COMPARATOR_NAME`] with the trailing NUL the engine expects.
pub const COMPARATOR_NAME_C: &CStr = c"SampleKeyComparator";

/// A total order over encoded keys, as consumed by an LSM storage engine.
pub trait KeyComparator: Send + Sync {
    /// Orders two encoded keys.
    ///
    /// Must be deterministic, total and antisymmetric over every byte
    /// string, since the engine never validates keys before comparing them.
    fn compare(&self, left: &[u8], right: &[u8]) -> Ordering;

    /// Returns the stable name identifying this ordering on disk.
    fn name(&self) -> &'static CStr;

    /// Releases comparator state when the engine drops the comparator.
    fn teardown(&self) {}
}

/// Comparator for encoded sample keys.
///
/// Decodes both keys (failing closed on malformed input) and applies
/// [`order`]. Zero-sized and `Copy`: every instance is interchangeable.
///
/// Decoding copies the fingerprint's `first` and `last` characters, so a
/// call makes up to four small allocations. Byte-identical buffers compare
/// equal without decoding.
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use samplekey::comparator::{KeyComparator, SampleKeyComparator};
/// use samplekey::key::{FingerprintSummary, SampleKey};
///
/// let comparator = SampleKeyComparator::new();
/// let key = SampleKey::new(FingerprintSummary::new(1000, "a", 0, "z"), 1).encode();
///
/// assert_eq!(comparator.compare(&[], &key), Ordering::Less);
/// assert_eq!(comparator.identity(), "SampleKeyComparator");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleKeyComparator;

impl SampleKeyComparator {
    /// Creates a comparator.
    pub const fn new() -> Self {
        Self
    }

    /// Returns the comparator name as a Rust string.
    pub const fn identity(&self) -> &'static str {
        COMPARATOR_NAME
    }

    /// Sorts encoded keys into the order the storage engine would hold them.
    ///
    /// Each key is decoded once. The sort is stable, so keys that compare
    /// equal keep their input order.
    pub fn sort<K: AsRef<[u8]>>(&self, keys: impl IntoIterator<Item = K>) -> Vec<K> {
        let mut decoded: Vec<(SampleKey, K)> = keys
            .into_iter()
            .map(|key| (SampleKey::decode(key.as_ref()), key))
            .collect();
        decoded.sort_by(|(a, _), (b, _)| order(a, b));
        decoded.into_iter().map(|(_, key)| key).collect()
    }
}

impl KeyComparator for SampleKeyComparator {
    #[inline]
    fn compare(&self, left: &[u8], right: &[u8]) -> Ordering {
        if left == right {
            return Ordering::Equal;
        }
        order(&SampleKey::decode(left), &SampleKey::decode(right))
    }

    fn name(&self) -> &'static CStr {
        COMPARATOR_NAME_C
    }
}
