//! Lounge engine HTTP server.
//!
//! Reads `LOUNGE_CONFIG_DIR` (default `./config/lounge`) and
//! `LOUNGE_BIND_ADDR` (default `0.0.0.0:3000`), optionally from a `.env`
//! file, then serves the API and runs the booking scheduler. Floor events
//! are broadcast to WebSocket clients on `GET /events`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lounge_engine::api::{AppState, create_router};
use lounge_engine::config::ConfigLoader;
use lounge_engine::lounge::{BroadcastPublisher, InMemoryStore, spawn_booking_scheduler};

const DEFAULT_CONFIG_DIR: &str = "./config/lounge";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const EVENT_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("LOUNGE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr: SocketAddr = std::env::var("LOUNGE_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    let scan_interval = Duration::from_secs(config.lounge().booking_scan_interval_seconds);
    info!(
        lounge = %config.lounge().name,
        config_dir = %config_dir,
        "Configuration loaded"
    );

    let publisher = Arc::new(BroadcastPublisher::new(EVENT_BUFFER));
    let state = AppState::new(config, Arc::new(InMemoryStore::new()), publisher);

    spawn_booking_scheduler(state.service_handle(), scan_interval);

    let app = create_router(state);
    info!(%addr, "Lounge engine listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
