//! Key generation endpoint.

use axum::Json;
use serde::Serialize;

use anamsg_crypto::KeyFile;

/// Response carrying the freshly generated key artifact.
#[derive(Debug, Serialize)]
pub struct KeygenResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Both participants' key pairs.
    pub keys: KeyFile,
}

/// Generate a dictator pair and an Alice pair.
pub async fn keygen() -> Json<KeygenResponse> {
    let keys = KeyFile::generate();
    tracing::info!(
        dictator = %keys.dictator.public,
        alice = %keys.alice.public,
        "generated key pairs"
    );
    Json(KeygenResponse {
        message: "Keys generated successfully".to_string(),
        keys,
    })
}
