use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

mod config;
mod error;
mod routes;

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    common::logging::init()?;

    info!(
        version = routes::API_VERSION,
        "Starting {}: {}",
        routes::API_TITLE,
        routes::API_DESCRIPTION
    );

    let config = ApiConfig::from_env()?;
    let app = routes::create_router(&config)?;

    // Start the web server
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
