//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{InMemoryResultStore, WebhookDispatcher},
    config::Config,
    error::ApiError,
    web::{self, state::AppState},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired result entries are swept out of the store.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Adapters ---
    let store = Arc::new(InMemoryResultStore::new());
    let http_client = reqwest::Client::new();
    let dispatcher = Arc::new(WebhookDispatcher::new(
        http_client,
        config.webhook_url.clone(),
    ));

    // --- 3. Spawn the Store Sweeper ---
    // Reads already ignore expired entries; the sweeper reclaims sessions
    // that were abandoned without ever being polled to completion.
    let sweeper_store = store.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sweeper_store.sweep_expired().await;
            if removed > 0 {
                debug!("Swept {removed} expired result entries");
            }
        }
    });

    // --- 4. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState {
        store,
        dispatcher,
        config: config.clone(),
    });
    let app = web::app(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
