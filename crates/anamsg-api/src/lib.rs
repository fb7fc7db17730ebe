//! # anamsg-api — Axum API Service
//!
//! HTTP surface of the anamorphic messaging stack. Handlers call straight
//! into `anamsg-core` and `anamsg-crypto`; there is no business logic at
//! this layer beyond request validation and response shaping.
//!
//! ## Routes
//!
//! - `GET  /` — liveness probe (connection testing from the frontend)
//! - `POST /api/keygen` — generate both participants' key pairs
//! - `POST /api/encrypt` — encrypt the dictator integer + covert message
//! - `POST /api/decrypt-dictator` — recover the dictator integer
//! - `POST /api/decrypt-alice` — bounded covert-index recovery
//!
//! ## Middleware
//!
//! TraceLayer → CorsLayer (browser frontend on localhost:3000) →
//! per-route timeouts: ordinary requests get 10 s, recovery gets 35 s to
//! cover the full 30-bit search.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Timeout budget for ordinary request/response exchanges.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout budget for the long-running recovery exchange.
const RECOVERY_TIMEOUT: Duration = Duration::from_secs(35);

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let recovery = Router::new()
        .route("/api/decrypt-alice", post(routes::decrypt::alice))
        .layer(TimeoutLayer::new(RECOVERY_TIMEOUT));

    let ordinary = Router::new()
        .route("/", get(routes::root))
        .route("/api/keygen", post(routes::keygen::keygen))
        .route("/api/encrypt", post(routes::encrypt::handle))
        .route("/api/decrypt-dictator", post(routes::decrypt::dictator))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    ordinary
        .merge(recovery)
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

/// CORS policy for the browser frontend.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:3000"))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
