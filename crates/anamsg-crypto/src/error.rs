//! Error types for the cryptographic channel.

use std::time::Duration;

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// A group element failed to decode from its compressed encoding.
    #[error("invalid group element: {0}")]
    InvalidPoint(String),

    /// A cipher artifact could not be parsed.
    #[error("malformed cipher: {0}")]
    MalformedCipher(String),

    /// A recovered value fell outside the representable integer range.
    #[error("recovered value does not fit the message range")]
    MessageOutOfRange,

    /// The requested search bound exceeds the schema's index space.
    #[error("search bound {bound} exceeds the maximum {max}")]
    SearchBoundTooLarge {
        /// The rejected bound.
        bound: u64,
        /// The largest admissible bound.
        max: u64,
    },

    /// The covert index was not found within the search bound.
    #[error("index not found in range 0..{bound} (time: {elapsed:?})")]
    IndexNotFound {
        /// The exhausted search bound.
        bound: u64,
        /// Wall-clock time spent searching.
        elapsed: Duration,
    },
}
