//! Encryption endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};

use anamsg_core::PackedMessage;
use anamsg_crypto::{encrypt, CipherText, SecretScalar};

use crate::error::ApiError;

/// Encrypt request. `x` and `cm` arrive as decimal strings from the
/// frontend; both are optional with the documented defaults.
#[derive(Debug, Deserialize)]
pub struct EncryptRequest {
    /// Dictator private scalar, hex.
    pub dict_priv: Option<String>,
    /// Alice private scalar, hex.
    pub alice_priv: Option<String>,
    /// Dictator-channel integer, decimal. Defaults to `"5"`.
    pub x: Option<String>,
    /// Covert packed message, decimal. Defaults to `"99"`.
    pub cm: Option<String>,
}

/// Encrypt response.
#[derive(Debug, Serialize)]
pub struct EncryptResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The cipher artifact.
    pub cipher: CipherText,
}

/// Encrypt the dictator integer and the covert packed message.
pub async fn handle(Json(req): Json<EncryptRequest>) -> Result<Json<EncryptResponse>, ApiError> {
    let (Some(dict_priv), Some(alice_priv)) = (req.dict_priv, req.alice_priv) else {
        return Err(ApiError::MissingParameters(
            "Both dict_priv and alice_priv are required".to_string(),
        ));
    };

    let dict = SecretScalar::from_hex(&dict_priv)?;
    let alice = SecretScalar::from_hex(&alice_priv)?;

    let x_raw = req.x.unwrap_or_else(|| "5".to_string());
    let x: u64 = x_raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("x must be a non-negative integer: {x_raw:?}")))?;

    // The covert value must be a valid packed message before it may cross
    // into the encryption layer.
    let cm: PackedMessage = req.cm.unwrap_or_else(|| "99".to_string()).parse()?;

    tracing::info!(x, cm = %cm, "encrypting message");
    let cipher = encrypt(&dict, &alice, x, cm);

    Ok(Json(EncryptResponse {
        message: "Encryption successful".to_string(),
        cipher,
    }))
}
