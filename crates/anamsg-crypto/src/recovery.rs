//! # Covert-Index Recovery — Baby-Step/Giant-Step
//!
//! Alice's side of the covert channel. Stripping `t·G` from the ephemeral
//! point leaves `cm·G`; the packed message `cm` is then the discrete log
//! of that residue, bounded by the schema's 30-bit index space, which a
//! baby-step/giant-step search recovers in `O(sqrt(bound))` group
//! operations (~32k steps at the full bound).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::traits::Identity;
use curve25519_dalek::{RistrettoPoint, Scalar};

use crate::cipher::CipherText;
use crate::error::CryptoError;
use crate::keys::SecretScalar;

/// The largest admissible search bound: the top of the 30-bit packed
/// message range.
pub const MAX_SEARCH_INDEX: u64 = (1 << 30) - 1;

/// A successful recovery: the covert index and the time the search took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    /// The recovered covert index (the packed message integer).
    pub index: u64,
    /// Wall-clock search time.
    pub elapsed: Duration,
}

impl Recovery {
    /// The human-readable status line reported to callers. Downstream
    /// consumers parse the digits after `"recovered index (cm):"` out of
    /// this exact shape.
    pub fn status_line(&self) -> String {
        format!(
            "Alice recovered index (cm): {} (in {:?})",
            self.index, self.elapsed
        )
    }
}

/// Search for the covert index hidden in a cipher's ephemeral point.
///
/// `bound` is the inclusive upper limit of the search, at most
/// [`MAX_SEARCH_INDEX`]. Baby steps tabulate `j·G` for `j < m` with
/// `m = ceil(sqrt(bound + 1))`; giant steps walk `A - i·m·G` until a baby
/// entry matches, yielding `index = i·m + j`.
///
/// # Errors
///
/// [`CryptoError::IndexNotFound`] if the bound is exhausted — the cipher
/// was produced with a different key or a larger index.
pub fn recover_index(
    alice_priv: &SecretScalar,
    cipher: &CipherText,
    bound: u64,
) -> Result<Recovery, CryptoError> {
    if bound > MAX_SEARCH_INDEX {
        return Err(CryptoError::SearchBoundTooLarge {
            bound,
            max: MAX_SEARCH_INDEX,
        });
    }

    let residue = cipher.c1_point()? - alice_priv.scalar() * RISTRETTO_BASEPOINT_POINT;

    let n = bound + 1;
    let m = (n as f64).sqrt().ceil() as u64;

    let start = Instant::now();

    // Baby steps: j·G for j in 0..m, built incrementally.
    let mut baby: HashMap<[u8; 32], u64> = HashMap::with_capacity(m as usize);
    let mut step = RistrettoPoint::identity();
    for j in 0..m {
        baby.insert(step.compress().to_bytes(), j);
        step += RISTRETTO_BASEPOINT_POINT;
    }

    // Giant steps: walk the residue backwards in strides of m·G.
    let stride = Scalar::from(m) * RISTRETTO_BASEPOINT_POINT;
    let mut giant = residue;
    for i in 0..=m {
        if let Some(&j) = baby.get(&giant.compress().to_bytes()) {
            let index = i * m + j;
            if index < n {
                return Ok(Recovery {
                    index,
                    elapsed: start.elapsed(),
                });
            }
        }
        giant -= stride;
    }

    Err(CryptoError::IndexNotFound {
        bound,
        elapsed: start.elapsed(),
    })
}
