//! Decoded sample keys.
//!
//! This module turns the raw byte strings the storage engine hands to the
//! comparator into [`SampleKey`] records, and back again for producers.
//!
//! # Key identity and payload
//!
//! A [`SampleKey`] carries two kinds of fields:
//!
//! - **Key identity**: the [`FingerprintSummary`] and the `timestamp`. These
//!   decide the key's position in the engine's sort order and never change
//!   once the key has been written.
//! - **Payload**: `last_timestamp` and `sample_count`. They ride in the same
//!   envelope and may change as samples accumulate under an unchanged key.
//!   Ordering never looks at them.
//!
//! # Decoding policy
//!
//! [`SampleKey::decode`] cannot fail. An empty buffer is the zero record, a
//! valid key that sorts before every key with a non-zero fingerprint or a
//! positive timestamp. The timestamp is signed, so a key with a zero
//! fingerprint and a negative timestamp sorts before it. A buffer that does not
//! parse is treated exactly like an empty one: the whole record is zeroed,
//! including any fields decoded before the fault. Use
//! [`SampleKey::try_decode`] to observe the failure instead.
//!
//! # Example
//!
//! ```rust
//! use samplekey::key::{FingerprintSummary, SampleKey};
//!
//! let key = SampleKey::new(FingerprintSummary::new(1000, "a", 0, "z"), 1)
//!     .with_payload(5, 3);
//!
//! let bytes = key.encode();
//! assert_eq!(SampleKey::decode(&bytes), key);
//! assert!(SampleKey::decode(&[]).is_zero());
//! ```

use std::fmt;

use prost::Message;
use prost::bytes::BufMut;
use serde::{Serialize, Serializer};

use crate::error::{DecodeError, EncodeError, Result};
use crate::proto;

/// Compact, collision-tolerant summary of a metric's label set.
///
/// The fields are opaque to this crate: they are compared, never recomputed
/// or validated against a label set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FingerprintSummary {
    /// Digest of the full label set. Not collision-free.
    pub hash: u64,

    /// First character derived from the label set.
    #[serde(serialize_with = "serialize_lossy")]
    pub first: Vec<u8>,

    /// Length-derived checksum of the label matter.
    pub modulus: u32,

    /// Last character derived from the label set.
    #[serde(serialize_with = "serialize_lossy")]
    pub last: Vec<u8>,
}

impl FingerprintSummary {
    /// Creates a fingerprint summary from its four components.
    pub fn new(
        hash: u64,
        first: impl Into<Vec<u8>>,
        modulus: u32,
        last: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            hash,
            first: first.into(),
            modulus,
            last: last.into(),
        }
    }

    /// Returns `true` if every component is at its zero value.
    pub fn is_zero(&self) -> bool {
        self.hash == 0 && self.first.is_empty() && self.modulus == 0 && self.last.is_empty()
    }
}

impl From<proto::Fingerprint> for FingerprintSummary {
    fn from(fingerprint: proto::Fingerprint) -> Self {
        Self {
            hash: fingerprint.hash,
            first: fingerprint.first,
            modulus: fingerprint.modulus,
            last: fingerprint.last,
        }
    }
}

impl From<&FingerprintSummary> for proto::Fingerprint {
    fn from(fingerprint: &FingerprintSummary) -> Self {
        Self {
            hash: fingerprint.hash,
            first: fingerprint.first.clone(),
            modulus: fingerprint.modulus,
            last: fingerprint.last.clone(),
        }
    }
}

impl fmt::Display for FingerprintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:020}-{}-{}-{}",
            self.hash,
            String::from_utf8_lossy(&self.first),
            self.modulus,
            String::from_utf8_lossy(&self.last),
        )
    }
}

/// A decoded sample key: the unit the storage engine orders.
///
/// The derived `PartialEq` compares every field, payload included. Use
/// [`SampleKey::same_key`] or [`crate::order::order`] for key identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SampleKey {
    /// Series this key belongs to.
    pub fingerprint: FingerprintSummary,

    /// Time boundary owned by this key.
    pub timestamp: i64,

    /// Newest sample timestamp stored under the key. Payload only.
    pub last_timestamp: i64,

    /// Number of samples stored under the key. Payload only.
    pub sample_count: u32,
}

impl SampleKey {
    /// Creates a key with zeroed payload fields.
    pub fn new(fingerprint: FingerprintSummary, timestamp: i64) -> Self {
        Self {
            fingerprint,
            timestamp,
            last_timestamp: 0,
            sample_count: 0,
        }
    }

    /// Sets the payload fields.
    #[must_use]
    pub fn with_payload(mut self, last_timestamp: i64, sample_count: u32) -> Self {
        self.last_timestamp = last_timestamp;
        self.sample_count = sample_count;
        self
    }

    /// Decodes an encoded key, failing closed.
    ///
    /// Returns the zero record for an empty buffer and for any buffer that
    /// is not a structurally valid `SampleKey` message.
    pub fn decode(buf: &[u8]) -> Self {
        match Self::try_decode(buf) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("treating undecodable sample key as zero: {e}");
                Self::default()
            }
        }
    }

    /// Decodes an encoded key, reporting malformed input.
    ///
    /// An empty buffer is not an error; it decodes to the zero record.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] if the buffer cannot be parsed.
    pub fn try_decode(buf: &[u8]) -> Result<Self> {
        let message = proto::SampleKey::decode(buf)
            .map_err(|source| DecodeError::Malformed { len: buf.len(), source })?;
        Ok(message.into())
    }

    /// Encodes the key into a freshly allocated buffer.
    ///
    /// The zero record encodes to an empty buffer.
    pub fn encode(&self) -> Vec<u8> {
        proto::SampleKey::from(self).encode_to_vec()
    }

    /// Appends the encoded key to `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` cannot hold the whole
    /// key; nothing is written in that case.
    pub fn encode_to(&self, buf: &mut impl BufMut) -> Result<()> {
        proto::SampleKey::from(self)
            .encode(buf)
            .map_err(|source| EncodeError::BufferTooSmall {
                required: source.required_capacity(),
                remaining: source.remaining(),
            })?;
        Ok(())
    }

    /// Returns `true` if this is the record an empty buffer decodes to.
    pub fn is_zero(&self) -> bool {
        self.fingerprint.is_zero()
            && self.timestamp == 0
            && self.last_timestamp == 0
            && self.sample_count == 0
    }

    /// Returns `true` if both keys share fingerprint and timestamp.
    ///
    /// Payload fields are ignored.
    pub fn same_key(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint && self.timestamp == other.timestamp
    }
}

impl From<proto::SampleKey> for SampleKey {
    fn from(key: proto::SampleKey) -> Self {
        Self {
            fingerprint: key.fingerprint.map(Into::into).unwrap_or_default(),
            timestamp: key.timestamp,
            last_timestamp: key.last_timestamp,
            sample_count: key.sample_count,
        }
    }
}

impl From<&SampleKey> for proto::SampleKey {
    fn from(key: &SampleKey) -> Self {
        Self {
            fingerprint: (!key.fingerprint.is_zero()).then(|| (&key.fingerprint).into()),
            timestamp: key.timestamp,
            last_timestamp: key.last_timestamp,
            sample_count: key.sample_count,
        }
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} (last={}, samples={})",
            self.fingerprint, self.timestamp, self.last_timestamp, self.sample_count
        )
    }
}

fn serialize_lossy<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
