//! Protobuf wire types for encoded sample keys.
//!
//! Hand-written types mirroring the storage schema's `Fingerprint` and
//! `SampleKey` messages. The schema is owned outside this crate; these types
//! exist only so keys can be decoded (and, for producers and tests, encoded)
//! without protoc or `.proto` file management.
//!
//! `first` and `last` are declared as `string` in the schema. They are decoded
//! here as `bytes`, which shares the wire representation: invalid UTF-8 then
//! cannot fail an otherwise sound key, and comparison stays byte-wise.

/// Compact stand-in for a metric's label set.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Fingerprint {
    /// 64-bit digest of the full label set.
    #[prost(uint64, tag = "1")]
    pub hash: u64,
    /// First character of the label set's canonical representation.
    #[prost(bytes = "vec", tag = "2")]
    pub first: Vec<u8>,
    /// Length-derived checksum of the label matter.
    #[prost(uint32, tag = "3")]
    pub modulus: u32,
    /// Last character of the label set's canonical representation.
    #[prost(bytes = "vec", tag = "4")]
    pub last: Vec<u8>,
}

/// Key of a chunk of samples in the on-disk sample store.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct SampleKey {
    /// Series the chunk belongs to.
    #[prost(message, optional, tag = "1")]
    pub fingerprint: Option<Fingerprint>,
    /// Time boundary owned by this key.
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
    /// Timestamp of the newest sample stored under this key.
    #[prost(int64, tag = "3")]
    pub last_timestamp: i64,
    /// Number of samples stored under this key.
    #[prost(uint32, tag = "4")]
    pub sample_count: u32,
}
