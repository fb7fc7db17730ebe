//! # Key Material — Scalars, Points, and the Key Artifact
//!
//! Key newtypes over the ristretto255 group. A private key is a group
//! scalar; its public counterpart is the compressed basepoint multiple.
//!
//! ## Serde
//!
//! - Public points serialize/deserialize as 64-character hex strings of
//!   their compressed encoding.
//! - Secret scalars serialize as hex too: the key artifact written by
//!   `keygen` deliberately carries both halves of each pair, because the
//!   participants paste private keys into their own clients. `Debug`
//!   output stays redacted so secrets never reach logs.

use chrono::{DateTime, Utc};
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::{RistrettoPoint, Scalar};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// A private scalar for one participant.
///
/// Zeroized on drop. `Debug` never prints the scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretScalar(Scalar);

/// A public group element in compressed encoding (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicPoint(CompressedRistretto);

/// One participant's key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// The private scalar.
    #[serde(rename = "priv")]
    pub secret: SecretScalar,
    /// The matching public point.
    #[serde(rename = "pub")]
    pub public: PublicPoint,
}

/// The key artifact produced by key generation: one pair for the dictator
/// channel and one for Alice's covert channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    /// The dictator's key pair.
    pub dictator: KeyPair,
    /// Alice's key pair.
    pub alice: KeyPair,
    /// Generation time, UTC.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// SecretScalar impls
// ---------------------------------------------------------------------------

impl SecretScalar {
    /// Generate a random secret scalar from OS randomness.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self(Scalar::random(&mut csprng))
    }

    /// Wrap an existing scalar.
    pub fn from_scalar(scalar: Scalar) -> Self {
        Self(scalar)
    }

    /// Borrow the inner scalar for group arithmetic.
    pub fn scalar(&self) -> &Scalar {
        &self.0
    }

    /// The public point `secret · G`.
    pub fn public(&self) -> PublicPoint {
        PublicPoint::from_point(&(self.0 * RISTRETTO_BASEPOINT_POINT))
    }

    /// Render the scalar as a lowercase hex string (little-endian bytes).
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0.as_bytes())
    }

    /// Parse a scalar from a 64-character hex string. The encoding must be
    /// canonical (reduced mod the group order).
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_array(hex).map_err(CryptoError::KeyError)?;
        let scalar: Option<Scalar> = Scalar::from_canonical_bytes(bytes).into();
        scalar
            .map(Self)
            .ok_or_else(|| CryptoError::KeyError("scalar encoding is not canonical".to_string()))
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for SecretScalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SecretScalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretScalar(<private>)")
    }
}

// ---------------------------------------------------------------------------
// PublicPoint impls
// ---------------------------------------------------------------------------

impl PublicPoint {
    /// Compress a group element.
    pub fn from_point(point: &RistrettoPoint) -> Self {
        Self(point.compress())
    }

    /// Decompress back to a group element.
    pub fn to_point(&self) -> Result<RistrettoPoint, CryptoError> {
        self.0
            .decompress()
            .ok_or_else(|| CryptoError::InvalidPoint(self.to_hex()))
    }

    /// The raw 32-byte compressed encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Render the compressed encoding as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0.as_bytes())
    }

    /// Parse a point from a 64-character hex string of its compressed
    /// encoding. Fails if the encoding is not a valid group element.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_array(hex).map_err(CryptoError::InvalidPoint)?;
        let compressed = CompressedRistretto(bytes);
        if compressed.decompress().is_none() {
            return Err(CryptoError::InvalidPoint(hex.to_string()));
        }
        Ok(Self(compressed))
    }

    /// SHA-256 fingerprint of the compressed encoding, hex-rendered.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        bytes_to_hex(&digest)
    }
}

impl Serialize for PublicPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for PublicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicPoint({}...)", &self.to_hex()[..8])
    }
}

impl std::fmt::Display for PublicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// KeyPair / KeyFile impls
// ---------------------------------------------------------------------------

impl KeyPair {
    /// Generate a fresh key pair.
    pub fn generate() -> Self {
        let secret = SecretScalar::generate();
        let public = secret.public();
        Self { secret, public }
    }
}

impl KeyFile {
    /// Generate the full key artifact for both participants.
    pub fn generate() -> Self {
        Self {
            dictator: KeyPair::generate(),
            alice: KeyPair::generate(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub(crate) fn hex_to_array(hex: &str) -> Result<[u8; 32], String> {
    let hex = hex.trim().to_lowercase();
    if hex.len() != 64 {
        return Err(format!("hex encoding must be 64 chars, got {}", hex.len()));
    }
    let mut out = [0u8; 32];
    for (i, chunk) in out.iter_mut().enumerate() {
        let pos = i * 2;
        *chunk = u8::from_str_radix(&hex[pos..pos + 2], 16)
            .map_err(|e| format!("invalid hex at position {pos}: {e}"))?;
    }
    Ok(out)
}
