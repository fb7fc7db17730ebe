//! # Anamorphic Encryption — Dual-Channel Cipher
//!
//! One cipher artifact carries two messages. The dictator-visible integer
//! `x` rides in `c0`, blinded by a shared secret only the dictator key can
//! reproduce. The covert packed message rides in the *randomness*: the
//! ephemeral scalar is `r = cm + t`, so Alice — and only Alice, holding
//! `t` — can strip `t·G` from `c1` and search for `cm` (see
//! [`crate::recovery`]).
//!
//! The packed message enters this layer as an opaque integer in
//! `[0, 2^30 - 1]`; this module performs no encoding or decoding of its
//! fields.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::{RistrettoPoint, Scalar};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use anamsg_core::PackedMessage;

use crate::error::CryptoError;
use crate::keys::{bytes_to_hex, hex_to_array, SecretScalar};

/// The cipher artifact: `c0` carries the blinded dictator integer, `c1`
/// the ephemeral point whose discrete log hides the covert index.
///
/// Serializes as hex strings (the cipher.json wire shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherText {
    /// Blinded dictator-channel value: `mask(r·Y) + x`.
    pub c0: Scalar,
    /// Ephemeral point `r·G` in compressed encoding.
    pub c1: CompressedRistretto,
}

impl Serialize for CipherText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("CipherText", 2)?;
        s.serialize_field("c0", &bytes_to_hex(self.c0.as_bytes()))?;
        s.serialize_field("c1", &bytes_to_hex(self.c1.as_bytes()))?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for CipherText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            c0: String,
            c1: String,
        }
        let wire = Wire::deserialize(deserializer)?;
        CipherText::from_hex_parts(&wire.c0, &wire.c1).map_err(serde::de::Error::custom)
    }
}

impl CipherText {
    /// Rebuild a cipher from its hex wire fields.
    pub fn from_hex_parts(c0: &str, c1: &str) -> Result<Self, CryptoError> {
        let c0_bytes = hex_to_array(c0).map_err(CryptoError::MalformedCipher)?;
        let c0_scalar: Option<Scalar> = Scalar::from_canonical_bytes(c0_bytes).into();
        let c0 = c0_scalar
            .ok_or_else(|| CryptoError::MalformedCipher("c0 is not a canonical scalar".into()))?;

        let c1_bytes = hex_to_array(c1).map_err(CryptoError::MalformedCipher)?;
        let c1 = CompressedRistretto(c1_bytes);
        if c1.decompress().is_none() {
            return Err(CryptoError::MalformedCipher(
                "c1 is not a valid group element".into(),
            ));
        }
        Ok(Self { c0, c1 })
    }

    /// The decompressed ephemeral point.
    pub(crate) fn c1_point(&self) -> Result<RistrettoPoint, CryptoError> {
        self.c1
            .decompress()
            .ok_or_else(|| CryptoError::InvalidPoint(bytes_to_hex(self.c1.as_bytes())))
    }

    /// Hex rendering of `c0`.
    pub fn c0_hex(&self) -> String {
        bytes_to_hex(self.c0.as_bytes())
    }

    /// Hex rendering of the compressed `c1`.
    pub fn c1_hex(&self) -> String {
        bytes_to_hex(self.c1.as_bytes())
    }

    /// SHA-256 fingerprint of the compressed `c1` encoding, hex-rendered.
    pub fn c1_fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        bytes_to_hex(&Sha256::digest(self.c1.as_bytes()))
    }
}

/// Reduce a group element's compressed encoding to a scalar. Both sides of
/// the dictator channel derive the same mask from the same point, so the
/// blinding cancels exactly.
fn mask(point: &RistrettoPoint) -> Scalar {
    Scalar::from_bytes_mod_order(point.compress().to_bytes())
}

/// Convert a scalar known to hold a small integer back to `u64`.
fn scalar_to_u64(scalar: &Scalar) -> Result<u64, CryptoError> {
    let bytes = scalar.as_bytes();
    if bytes[8..].iter().any(|&b| b != 0) {
        return Err(CryptoError::MessageOutOfRange);
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[..8]);
    Ok(u64::from_le_bytes(low))
}

/// Encrypt the dictator integer `x` and the covert packed message `cm`
/// into one cipher artifact.
///
/// `r = cm + t` ties the covert channel to the ephemeral randomness;
/// `c1 = r·G`; `c0 = mask(r·Y) + x` with `Y` the dictator public point.
pub fn encrypt(
    dict_priv: &SecretScalar,
    alice_priv: &SecretScalar,
    x: u64,
    cm: PackedMessage,
) -> CipherText {
    let t = alice_priv.scalar();
    let r = Scalar::from(u64::from(cm.value())) + t;

    let dict_pub = dict_priv.scalar() * RISTRETTO_BASEPOINT_POINT;
    let shared = r * dict_pub;

    CipherText {
        c0: mask(&shared) + Scalar::from(x),
        c1: (r * RISTRETTO_BASEPOINT_POINT).compress(),
    }
}

/// Recover the dictator-channel integer `x` from a cipher.
///
/// `sk·c1 = r·Y` reproduces the blinding mask; subtracting it from `c0`
/// leaves exactly `x`.
pub fn decrypt_dictator(dict_priv: &SecretScalar, cipher: &CipherText) -> Result<u64, CryptoError> {
    let shared = dict_priv.scalar() * cipher.c1_point()?;
    let x = cipher.c0 - mask(&shared);
    scalar_to_u64(&x)
}
