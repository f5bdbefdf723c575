//! # samplekey
//!
//! Sample-key comparator for LSM-backed time-series storage.
//!
//! The storage engine (LevelDB or a compatible LSM tree) keeps chunks of
//! samples under protobuf-encoded `SampleKey`s and treats those keys as
//! opaque bytes. This crate supplies the ordering: it decodes each key and
//! sorts by fingerprint, then by the key's timestamp, ignoring the payload
//! fields that change as samples accumulate.
//!
//! ## Key Properties
//!
//! - Pure function of two byte buffers: no state, no caching, no locks
//! - Total over every input: empty and malformed keys decode to the zero key
//! - Stable identity (`"SampleKeyComparator"`) recorded by the engine on disk
//! - C ABI callbacks ready for `leveldb_comparator_create`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cmp::Ordering;
//! use samplekey::{FingerprintSummary, KeyComparator, SampleKey, SampleKeyComparator};
//!
//! let fingerprint = FingerprintSummary::new(1000, "a", 0, "z");
//!
//! // Payload fields (last timestamp, sample count) never affect the order.
//! let older = SampleKey::new(fingerprint.clone(), 1).with_payload(10, 3);
//! let newer = SampleKey::new(fingerprint, 2).with_payload(20, 1);
//!
//! let comparator = SampleKeyComparator::new();
//! assert_eq!(comparator.compare(&older.encode(), &newer.encode()), Ordering::Less);
//! assert_eq!(comparator.compare(&[], &older.encode()), Ordering::Less);
//! ```
//!
//! ## Modules
//!
//! - [`key`]: Decoded key records; decoding and encoding
//! - [`order`]: The field-priority ordering
//! - [`comparator`]: [`KeyComparator`] trait, comparator identity
//! - [`ffi`]: C callbacks for the storage engine
//! - [`proto`]: Protobuf wire types
//! - [`error`]: Error types

pub mod comparator;
pub mod error;
pub mod ffi;
pub mod key;
pub mod order;
pub mod proto;

// Re-export primary API types at crate root for convenience.
pub use comparator::{COMPARATOR_NAME, KeyComparator, SampleKeyComparator};
pub use error::{DecodeError, EncodeError, Result, SampleKeyError};
pub use ffi::ComparatorCallbacks;
pub use key::{FingerprintSummary, SampleKey};
pub use order::order;
