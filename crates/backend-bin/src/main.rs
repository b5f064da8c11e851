use std::sync::Arc;

use backend_lib::{config::Settings, router, storage::MemoryStorage, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize configuration, falling back to the shipped default file
    let settings = Settings::load().or_else(|_| Settings::load_from("config/default.toml"))?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    // Create storage
    let storage = MemoryStorage::new();

    // Create application state
    let state = Arc::new(AppState::new(storage, settings));

    // Create the router
    let app = router::create_router(state.clone());

    // Start the server
    let addr = state.settings.bind_addr;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
