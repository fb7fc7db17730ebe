//! # anamsg-core — Foundational Types for the Anamorphic Messaging Stack
//!
//! This crate is the bedrock of the stack: the deterministic, bit-exact
//! codec that packs the semantic fields of a covert message into a single
//! 30-bit integer and unpacks that integer back into the same fields. The
//! packed integer is the only message representation that crosses the
//! boundary to the encryption layer, which treats it as an opaque payload.
//!
//! ## Key Design Principles
//!
//! 1. **`PackedMessage` newtype.** The wire integer has a private inner
//!    field; the only constructors are the range-checked `new()` and the
//!    encoder. Out-of-range values cannot exist.
//!
//! 2. **Closed vocabularies.** Every enumerable field is a closed enum in
//!    bijection with its code range, generated from a single listing —
//!    no runtime string-keyed table probing, no partial mappings.
//!
//! 3. **One schema table.** All shifts and masks derive from the
//!    width/offset table in [`schema`]; the encoder's bounds, the
//!    decoder's extraction, and the exported schema document cannot
//!    desynchronize.
//!
//! 4. **Asymmetric validation.** Encoding rejects bad inputs loudly and
//!    names the violated field; decoding clamps and degrades rather than
//!    failing on representable-but-hostile bit patterns.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `anamsg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Stateless and lock-free: every operation is a pure function over
//!   immutable registry data and may run concurrently from any thread.

pub mod codec;
pub mod error;
pub mod recovery;
pub mod schema;
pub mod vocab;

// Re-export primary types for ergonomic imports.
pub use codec::{decode, encode, render, DecodedMessage, FieldValues, PackedMessage, INVALID_FORMAT};
pub use error::CodecError;
pub use recovery::{parse_recovered_index, parse_recovered_message};
pub use schema::{schema_json, Field, FieldSpec, SCHEMA_BITS};
pub use vocab::{Action, Flag, Location, Modifier, Target};
