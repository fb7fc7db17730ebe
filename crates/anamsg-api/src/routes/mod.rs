//! # Route Handlers
//!
//! One module per concern:
//!
//! - `GET  /`                      — liveness probe
//! - `POST /api/keygen`            — generate both participants' key pairs
//! - `POST /api/encrypt`           — encrypt `x` (dictator) + `cm` (covert)
//! - `POST /api/decrypt-dictator`  — recover the dictator integer
//! - `POST /api/decrypt-alice`     — recover the covert index (long-running)

pub mod decrypt;
pub mod encrypt;
pub mod keygen;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe for connection testing.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
    }))
}
