//! Bounded retry for interpretation HTTP calls.
//!
//! Only transient transport failures (connection refused, timeouts,
//! mid-request drops) are retried, with a doubling delay between
//! attempts. HTTP status codes are never inspected here — a 4xx/5xx is a
//! delivered response, and the client decides what to do with it.

use std::time::Duration;

/// Total attempts, including the first.
const MAX_ATTEMPTS: u32 = 4;

/// Delay before the second attempt; doubles for each one after.
const INITIAL_BACKOFF: Duration = Duration::from_millis(200);

/// Whether a transport error is worth another attempt.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request()
}

/// Send an HTTP request, retrying transient transport failures.
///
/// The closure is invoked up to [`MAX_ATTEMPTS`] times with backoff
/// delays of 200ms, 400ms, 800ms between attempts. Non-transient errors
/// (TLS setup, builder misuse, body errors) surface immediately.
pub(crate) async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1;
    loop {
        let err = match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => e,
        };
        if attempt >= MAX_ATTEMPTS || !is_transient(&err) {
            return Err(err);
        }
        tracing::warn!(
            attempt,
            max_attempts = MAX_ATTEMPTS,
            "transient interpretation transport failure, retrying in {backoff:?}: {err}"
        );
        tokio::time::sleep(backoff).await;
        backoff *= 2;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn exhausts_attempts_on_connection_refused() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_send(|| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                // A request to a closed loopback port fails fast with a
                // connect error, which counts as transient.
                reqwest::Client::builder()
                    .timeout(Duration::from_millis(50))
                    .build()
                    .unwrap()
                    .get("http://127.0.0.1:1/")
                    .send()
                    .await
            }
        })
        .await;

        assert!(result.is_err(), "request to a closed port must fail");
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }
}
