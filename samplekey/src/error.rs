//! Error types for the samplekey comparator.
//!
//! The comparator itself is infallible: the storage engine treats it that
//! way, so [`SampleKey::decode`](crate::key::SampleKey::decode) never returns
//! an error. These types surface from the strict entry points used by
//! tooling and tests.

use thiserror::Error;

/// The main error type for all samplekey operations.
#[derive(Error, Debug)]
pub enum SampleKeyError {
    /// Error decoding an encoded sample key.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error encoding a sample key into a caller-supplied buffer.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Errors that can occur when decoding an encoded sample key.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The buffer is not a structurally valid `SampleKey` message.
    #[error("malformed sample key ({len} bytes): {source}")]
    Malformed {
        /// Length of the rejected buffer.
        len: usize,
        /// The underlying protobuf decoding error.
        #[source]
        source: prost::DecodeError,
    },
}

/// Errors that can occur when encoding a sample key.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The destination buffer cannot hold the encoded key.
    #[error("buffer too small: {required} bytes required, {remaining} remaining")]
    BufferTooSmall {
        /// Encoded length of the key.
        required: usize,
        /// Bytes left in the destination buffer.
        remaining: usize,
    },
}

/// Type alias for `Result<T, SampleKeyError>`.
pub type Result<T> = std::result::Result<T, SampleKeyError>;
