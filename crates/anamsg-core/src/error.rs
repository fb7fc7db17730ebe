//! # Error Types — Codec Error Taxonomy
//!
//! Defines the error types for the packed-message codec. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Encode-time bound violations name the violated field and its allowed
//!   range, and are raised before any bits are written.
//! - Decode-time range violations are fatal to the call and produce no
//!   partial decode.
//! - Unknown codes inside an otherwise valid message degrade to a
//!   synthesized label during decoding; [`CodecError::UnknownCode`] is the
//!   strict-lookup variant used where degradation is not acceptable.
//! - Codec errors are reported synchronously to the caller and are never
//!   retried: the inputs are invariant, so a retry cannot succeed.

use thiserror::Error;

use crate::schema::{Field, SCHEMA_BITS};

/// Errors produced by the packed-message codec and its boundary parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An encoder input violated its field's documented range.
    #[error("{field} out of range: {value} (allowed 0..={max})")]
    FieldOutOfRange {
        /// The field whose bound was violated.
        field: Field,
        /// The rejected value.
        value: u32,
        /// The inclusive upper bound for this field.
        max: u32,
    },

    /// Input text did not parse as a non-negative integer.
    #[error("invalid message value: {0:?}")]
    InvalidMessageValue(String),

    /// A packed value fell outside the schema's total bit range.
    #[error("message value {0} exceeds the {SCHEMA_BITS}-bit schema range")]
    ValueOutOfSchemaRange(u64),

    /// A code had no entry in the registry's label table.
    #[error("unknown code {code} for field {field}")]
    UnknownCode {
        /// The field whose table was consulted.
        field: Field,
        /// The unmapped code.
        code: u32,
    },

    /// A label had no entry in the registry's vocabulary.
    #[error("unknown {field} label: {label:?}")]
    UnknownLabel {
        /// The vocabulary that was consulted.
        field: &'static str,
        /// The unmatched label.
        label: String,
    },

    /// Recovery-subsystem output carried no parseable recovered index.
    /// The caller must not proceed with a wrong or absent packed value.
    #[error("recovery output did not contain a recovered index: {0:?}")]
    MalformedRecoveryOutput(String),
}
