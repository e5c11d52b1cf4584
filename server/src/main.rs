//! Star Wars API server.
//!
//! Run from repo root: `cargo run -p starwars-api-server`
//! Without `DATABASE_URL` the server keeps everything in memory.

use axum::extract::Request;
use axum::ServiceExt;
use starwars_api::{app, apply_seed, load_seed, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("starwars_api=info,tower_http=info")
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::connect(&config).await?;

    if let Some(dir) = &config.seed_path {
        let seed = load_seed(dir).await?;
        apply_seed(state.store(), seed).await?;
    }

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    let service = app(state.clone(), config.body_limit);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
