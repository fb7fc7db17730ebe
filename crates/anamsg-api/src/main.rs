//! # anamsg-api Entry Point
//!
//! Binds the API service on the loopback interface.

use anamsg_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(AppState::default())).await?;
    Ok(())
}
