// File: services/summit_backend/src/main.rs
use std::env;
use std::sync::Arc;
use summit_backend::{app, warm_up, AppState};
use summit_common::logging;
use summit_config::load_config;
use tokio::net::TcpListener;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for the shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = env::var("LOG_LEVEL").unwrap_or_default();
    logging::init_with_level(logging::level_from_str(&level));

    let config = Arc::new(load_config().inspect_err(|err| {
        error!("Failed to load config: {}", err);
    })?);
    let state = AppState::from_env(Arc::clone(&config));

    // Connect and create the table in the background; requests are served
    // meanwhile and connect on their own if this has not finished
    tokio::spawn(warm_up(state.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
