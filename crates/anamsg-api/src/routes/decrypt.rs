//! Decryption endpoints: the dictator channel and Alice's covert-index
//! recovery.
//!
//! Both endpoints report their result inside a human-readable `output`
//! line, matching what the recovery tooling prints; the caller owns the
//! extraction of any digits from that line. The typed index is
//! deliberately not duplicated into the response body.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use anamsg_crypto::{decrypt_dictator, recover_index, CipherText, CryptoError, SecretScalar};

use crate::error::ApiError;
use crate::state::AppState;

/// Dictator decrypt request.
#[derive(Debug, Deserialize)]
pub struct DictatorRequest {
    /// Dictator private scalar, hex.
    pub dict_priv: Option<String>,
    /// The cipher artifact.
    pub cipher: Option<CipherText>,
}

/// Alice recovery request.
#[derive(Debug, Deserialize)]
pub struct AliceRequest {
    /// Alice private scalar, hex.
    pub alice_priv: Option<String>,
    /// The cipher artifact.
    pub cipher: Option<CipherText>,
    /// Search bound, decimal string. Negative or absent selects the
    /// server default.
    pub max: Option<String>,
}

/// Decrypt response: the status line the caller parses.
#[derive(Debug, Serialize)]
pub struct DecryptResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Status line carrying the recovered value.
    pub output: String,
}

/// Recover the dictator-channel integer.
pub async fn dictator(
    Json(req): Json<DictatorRequest>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let (Some(dict_priv), Some(cipher)) = (req.dict_priv, req.cipher) else {
        return Err(ApiError::MissingParameters(
            "dict_priv and cipher are required".to_string(),
        ));
    };
    let dict = SecretScalar::from_hex(&dict_priv)?;

    let start = Instant::now();
    let x = decrypt_dictator(&dict, &cipher)?;
    let output = format!("Dictator recovered: {x} (in {:?})", start.elapsed());
    tracing::info!(%output, "dictator decryption complete");

    Ok(Json(DecryptResponse {
        message: "Decryption successful".to_string(),
        output,
    }))
}

/// Recover the covert index by bounded discrete-log search.
///
/// The search is CPU-bound for seconds at the full 30-bit bound, so it
/// runs on the blocking pool; the route carries the long timeout budget.
pub async fn alice(
    State(state): State<AppState>,
    Json(req): Json<AliceRequest>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let (Some(alice_priv), Some(cipher)) = (req.alice_priv, req.cipher) else {
        return Err(ApiError::MissingParameters(
            "alice_priv and cipher are required".to_string(),
        ));
    };
    let alice = SecretScalar::from_hex(&alice_priv)?;

    let bound = parse_bound(req.max.as_deref(), state.default_search_bound)?;
    tracing::info!(bound, "starting covert-index recovery");

    let result =
        tokio::task::spawn_blocking(move || recover_index(&alice, &cipher, bound))
            .await
            .map_err(|e| ApiError::Internal(format!("recovery task failed: {e}")))?;

    let output = match result {
        Ok(recovery) => recovery.status_line(),
        // An exhausted search is a negative result, not a server failure.
        Err(err @ CryptoError::IndexNotFound { .. }) => format!("Alice {err}"),
        Err(other) => return Err(other.into()),
    };
    tracing::info!(%output, "covert-index recovery complete");

    Ok(Json(DecryptResponse {
        message: "Decryption successful".to_string(),
        output,
    }))
}

/// Parse the request's search bound; negative or absent values select the
/// server default.
fn parse_bound(max: Option<&str>, default: u64) -> Result<u64, ApiError> {
    let Some(raw) = max else {
        return Ok(default);
    };
    let parsed: i64 = raw.trim().parse().map_err(|_| {
        ApiError::Validation(format!("max must be an integer: {raw:?}"))
    })?;
    if parsed < 0 {
        Ok(default)
    } else {
        Ok(parsed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound_defaults() {
        assert_eq!(parse_bound(None, 1000).unwrap(), 1000);
        assert_eq!(parse_bound(Some("-1"), 1000).unwrap(), 1000);
        assert_eq!(parse_bound(Some("500"), 1000).unwrap(), 500);
        assert!(parse_bound(Some("many"), 1000).is_err());
    }
}
