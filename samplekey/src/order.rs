//! The sample-key ordering.
//!
//! Keys sort ascending by these fields, each consulted only when every field
//! before it compares equal:
//!
//! 1. Fingerprint hash (numeric)
//! 2. Fingerprint first character (byte-wise lexicographic)
//! 3. Fingerprint label matter modulus (numeric)
//! 4. Fingerprint last character (byte-wise lexicographic)
//! 5. Key timestamp (numeric)
//!
//! Keys equal on all five are equal. `last_timestamp` and `sample_count` are
//! never read, so payload updates cannot move a key.
//!
//! This order is persisted by the storage engine. Changing it in any way
//! requires a new [`COMPARATOR_NAME`](crate::comparator::COMPARATOR_NAME).

use std::cmp::Ordering;

use crate::key::{FingerprintSummary, SampleKey};

/// Orders two decoded keys.
///
/// Allocation-free over decoded keys; returns on the first field that differs.
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use samplekey::key::{FingerprintSummary, SampleKey};
/// use samplekey::order::order;
///
/// let fp = FingerprintSummary::new(1000, "a", 0, "z");
/// let older = SampleKey::new(fp.clone(), 1);
/// let newer = SampleKey::new(fp, 2);
///
/// assert_eq!(order(&older, &newer), Ordering::Less);
/// assert_eq!(order(&SampleKey::default(), &older), Ordering::Less);
/// ```
#[inline]
pub fn order(a: &SampleKey, b: &SampleKey) -> Ordering {
    order_fingerprints(&a.fingerprint, &b.fingerprint)
        .then_with(|| a.timestamp.cmp(&b.timestamp))
}

/// Orders two fingerprint summaries by hash, first, modulus, then last.
#[inline]
pub fn order_fingerprints(a: &FingerprintSummary, b: &FingerprintSummary) -> Ordering {
    a.hash
        .cmp(&b.hash)
        .then_with(|| a.first.as_slice().cmp(b.first.as_slice()))
        .then_with(|| a.modulus.cmp(&b.modulus))
        .then_with(|| a.last.as_slice().cmp(b.last.as_slice()))
}

impl SampleKey {
    /// Method form of [`order`].
    #[inline]
    pub fn key_cmp(&self, other: &Self) -> Ordering {
        order(self, other)
    }
}

// Every field takes part in the comparison, so this agrees with the derived
// `PartialEq`. `SampleKey` has no `Ord`: its `PartialEq` also compares
// payload fields.
impl PartialOrd for FingerprintSummary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FingerprintSummary {
    fn cmp(&self, other: &Self) -> Ordering {
        order_fingerprints(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SampleKey {
        SampleKey::new(FingerprintSummary::new(1000, "a", 0, "z"), 1).with_payload(1, 1)
    }

    fn assert_order(left: &SampleKey, right: &SampleKey, expected: Ordering) {
        assert_eq!(order(left, right), expected, "{left} vs {right}");
        assert_eq!(order(right, left), expected.reverse(), "{right} vs {left}");
    }

    #[test]
    fn test_both_empty() {
        assert_order(&SampleKey::default(), &SampleKey::default(), Ordering::Equal);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_order(&SampleKey::default(), &base(), Ordering::Less);
    }

    #[test]
    fn test_identical_keys_are_equal() {
        assert_order(&base(), &base(), Ordering::Equal);
    }

    #[test]
    fn test_last_timestamp_is_ignored() {
        let right = base().with_payload(2, 1);
        assert_order(&base(), &right, Ordering::Equal);
    }

    #[test]
    fn test_sample_count_is_ignored() {
        let right = base().with_payload(1, 2);
        assert_order(&base(), &right, Ordering::Equal);
    }

    #[test]
    fn test_hash() {
        let mut left = base();
        left.fingerprint.hash = 999;
        assert_order(&left, &base(), Ordering::Less);
    }

    #[test]
    fn test_first() {
        let mut right = base();
        right.fingerprint.first = b"b".to_vec();
        assert_order(&base(), &right, Ordering::Less);
    }

    #[test]
    fn test_modulus() {
        let mut right = base();
        right.fingerprint.modulus = 1;
        assert_order(&base(), &right, Ordering::Less);
    }

    #[test]
    fn test_last() {
        let mut left = base();
        left.fingerprint.last = b"y".to_vec();
        assert_order(&left, &base(), Ordering::Less);
    }

    #[test]
    fn test_timestamp() {
        let mut right = base();
        right.timestamp = 2;
        assert_order(&base(), &right, Ordering::Less);
    }

    #[test]
    fn test_higher_priority_field_wins() {
        // Smaller hash beats every lower-priority field being larger.
        let left = SampleKey::new(FingerprintSummary::new(1, "z", 9, "z"), 9);
        let right = SampleKey::new(FingerprintSummary::new(2, "a", 0, "a"), 0);
        assert_order(&left, &right, Ordering::Less);

        // Equal hash: first decides before modulus, last and timestamp.
        let left = SampleKey::new(FingerprintSummary::new(1, "a", 9, "z"), 9);
        let right = SampleKey::new(FingerprintSummary::new(1, "b", 0, "a"), 0);
        assert_order(&left, &right, Ordering::Less);

        // Equal hash and first: modulus decides before last.
        let left = SampleKey::new(FingerprintSummary::new(1, "a", 0, "z"), 9);
        let right = SampleKey::new(FingerprintSummary::new(1, "a", 1, "a"), 0);
        assert_order(&left, &right, Ordering::Less);

        // Equal up to modulus: last decides before timestamp.
        let left = SampleKey::new(FingerprintSummary::new(1, "a", 0, "a"), 9);
        let right = SampleKey::new(FingerprintSummary::new(1, "a", 0, "b"), 0);
        assert_order(&left, &right, Ordering::Less);
    }

    #[test]
    fn test_characters_compare_bytewise() {
        // Upper case sorts before lower case, and a prefix before its extension.
        let upper = SampleKey::new(FingerprintSummary::new(1, "Z", 0, ""), 0);
        let lower = SampleKey::new(FingerprintSummary::new(1, "a", 0, ""), 0);
        assert_order(&upper, &lower, Ordering::Less);

        let short = SampleKey::new(FingerprintSummary::new(1, "a", 0, "x"), 0);
        let long = SampleKey::new(FingerprintSummary::new(1, "ab", 0, "a"), 0);
        assert_order(&short, &long, Ordering::Less);

        let ascii = SampleKey::new(FingerprintSummary::new(1, vec![0x7f], 0, ""), 0);
        let high = SampleKey::new(FingerprintSummary::new(1, vec![0xc3, 0xa9], 0, ""), 0);
        assert_order(&ascii, &high, Ordering::Less);
    }

    #[test]
    fn test_timestamp_is_signed() {
        let fp = FingerprintSummary::new(1, "a", 0, "z");
        let negative = SampleKey::new(fp.clone(), -5);
        let zero = SampleKey::new(fp, 0);
        assert_order(&negative, &zero, Ordering::Less);
    }

    #[test]
    fn test_negative_timestamp_sorts_before_empty() {
        let before_epoch = SampleKey::new(FingerprintSummary::default(), -1);
        assert_order(&SampleKey::default(), &before_epoch, Ordering::Greater);

        // Any fingerprint field still wins over the timestamp.
        let populated = SampleKey::new(FingerprintSummary::new(0, "", 0, "a"), i64::MIN);
        assert_order(&SampleKey::default(), &populated, Ordering::Less);
    }

    #[test]
    fn test_hash_is_unsigned() {
        let small = SampleKey::new(FingerprintSummary::new(1, "", 0, ""), 0);
        let large = SampleKey::new(FingerprintSummary::new(u64::MAX, "", 0, ""), 0);
        assert_order(&small, &large, Ordering::Less);
    }

    #[test]
    fn test_key_cmp_matches_order() {
        let mut other = base();
        other.timestamp = 5;
        assert_eq!(base().key_cmp(&other), order(&base(), &other));
    }

    #[test]
    fn test_fingerprint_ord() {
        let mut fingerprints = vec![
            FingerprintSummary::new(2, "a", 0, "a"),
            FingerprintSummary::new(1, "b", 0, "a"),
            FingerprintSummary::new(1, "a", 1, "a"),
            FingerprintSummary::new(1, "a", 0, "b"),
            FingerprintSummary::default(),
        ];
        fingerprints.sort();

        assert_eq!(
            fingerprints,
            vec![
                FingerprintSummary::default(),
                FingerprintSummary::new(1, "a", 0, "b"),
                FingerprintSummary::new(1, "a", 1, "a"),
                FingerprintSummary::new(1, "b", 0, "a"),
                FingerprintSummary::new(2, "a", 0, "a"),
            ]
        );
    }
}
