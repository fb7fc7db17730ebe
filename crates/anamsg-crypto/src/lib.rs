//! # anamsg-crypto — The Anamorphic Channel
//!
//! Cryptographic layer of the messaging stack: key generation, the
//! dual-channel cipher, dictator-side decryption, and Alice's
//! baby-step/giant-step recovery of the covert packed message.
//!
//! The packed message arrives from `anamsg-core` as an opaque integer in
//! `[0, 2^30 - 1]` and leaves this crate the same way; field semantics
//! never cross into the cryptography.
//!
//! ## Crate Policy
//!
//! - Secret scalars are zeroized on drop and never appear in `Debug`
//!   output.
//! - No `unsafe` code; no `.unwrap()` outside tests.
//! - All operations are synchronous and lock-free; recovery is the only
//!   long-running call (seconds at the full 30-bit bound) and callers own
//!   its timeout budget.

pub mod cipher;
pub mod error;
pub mod keys;
pub mod recovery;

pub use cipher::{decrypt_dictator, encrypt, CipherText};
pub use error::CryptoError;
pub use keys::{KeyFile, KeyPair, PublicPoint, SecretScalar};
pub use recovery::{recover_index, Recovery, MAX_SEARCH_INDEX};
