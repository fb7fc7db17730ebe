//! # End-to-End Endpoint Tests
//!
//! Drive the full router through tower's `oneshot`: key generation,
//! encryption, dictator decryption, and covert-index recovery, plus the
//! error contracts the frontend relies on. The recovery tests use small
//! search bounds so the whole suite stays fast.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use anamsg_api::{app, AppState};

/// Issue one request against a fresh router and return status + JSON body.
async fn call(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request builds"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    };

    let response = app(AppState::default())
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

#[tokio::test]
async fn root_reports_server_running() {
    let (status, body) = call("GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");
}

#[tokio::test]
async fn keygen_returns_both_pairs() {
    let (status, body) = call("POST", "/api/keygen", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Keys generated successfully");
    for participant in ["dictator", "alice"] {
        assert!(body["keys"][participant]["priv"].is_string());
        assert!(body["keys"][participant]["pub"].is_string());
    }
}

#[tokio::test]
async fn full_cycle_recovers_both_channels() {
    let (_, keys) = call("POST", "/api/keygen", Some(json!({}))).await;
    let dict_priv = keys["keys"]["dictator"]["priv"].as_str().unwrap();
    let alice_priv = keys["keys"]["alice"]["priv"].as_str().unwrap();

    let (status, encrypted) = call(
        "POST",
        "/api/encrypt",
        Some(json!({
            "dict_priv": dict_priv,
            "alice_priv": alice_priv,
            "x": "5",
            "cm": "99",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(encrypted["message"], "Encryption successful");
    let cipher = encrypted["cipher"].clone();
    assert!(cipher["c0"].is_string());
    assert!(cipher["c1"].is_string());

    // Dictator channel.
    let (status, decrypted) = call(
        "POST",
        "/api/decrypt-dictator",
        Some(json!({ "dict_priv": dict_priv, "cipher": cipher.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let output = decrypted["output"].as_str().unwrap();
    assert!(
        output.starts_with("Dictator recovered: 5 "),
        "unexpected output: {output}"
    );

    // Covert channel: the status line must round-trip through the
    // sanctioned parser back to the original packed value.
    let (status, recovered) = call(
        "POST",
        "/api/decrypt-alice",
        Some(json!({ "alice_priv": alice_priv, "cipher": cipher, "max": "1000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recovered["message"], "Decryption successful");
    let output = recovered["output"].as_str().unwrap();
    assert_eq!(anamsg_core::parse_recovered_index(output).unwrap(), 99);
}

#[tokio::test]
async fn alice_exhausted_bound_reports_not_found() {
    let (_, keys) = call("POST", "/api/keygen", Some(json!({}))).await;
    let dict_priv = keys["keys"]["dictator"]["priv"].as_str().unwrap();
    let alice_priv = keys["keys"]["alice"]["priv"].as_str().unwrap();

    let (_, encrypted) = call(
        "POST",
        "/api/encrypt",
        Some(json!({
            "dict_priv": dict_priv,
            "alice_priv": alice_priv,
            "cm": "500",
        })),
    )
    .await;

    let (status, recovered) = call(
        "POST",
        "/api/decrypt-alice",
        Some(json!({
            "alice_priv": alice_priv,
            "cipher": encrypted["cipher"],
            "max": "100",
        })),
    )
    .await;
    // A negative search result is still a successful exchange.
    assert_eq!(status, StatusCode::OK);
    let output = recovered["output"].as_str().unwrap();
    assert!(output.contains("not found"), "unexpected output: {output}");
    assert!(anamsg_core::parse_recovered_index(output).is_err());
}

#[tokio::test]
async fn encrypt_requires_both_private_keys() {
    let (status, body) = call(
        "POST",
        "/api/encrypt",
        Some(json!({ "dict_priv": "aa" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameters");
    assert_eq!(body["details"], "Both dict_priv and alice_priv are required");
}

#[tokio::test]
async fn encrypt_rejects_out_of_range_cm() {
    let (_, keys) = call("POST", "/api/keygen", Some(json!({}))).await;
    let (status, body) = call(
        "POST",
        "/api/encrypt",
        Some(json!({
            "dict_priv": keys["keys"]["dictator"]["priv"],
            "alice_priv": keys["keys"]["alice"]["priv"],
            "cm": "1073741824",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("30-bit schema range"));
}

#[tokio::test]
async fn decrypt_dictator_requires_cipher() {
    let (status, body) = call(
        "POST",
        "/api/decrypt-dictator",
        Some(json!({ "dict_priv": "aa" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameters");
}

#[tokio::test]
async fn encrypt_rejects_bad_key_hex() {
    let (status, body) = call(
        "POST",
        "/api/encrypt",
        Some(json!({ "dict_priv": "zz", "alice_priv": "zz" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"].as_str().unwrap().contains("hex"));
}
