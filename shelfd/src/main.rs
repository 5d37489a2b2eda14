//! Shelf Daemon
//!
//! Serves the product catalog over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! cargo run -p shelfd
//!
//! # Start with custom locations
//! SHELF_API_PORT=8081 SHELF_DATA_FILE=/var/lib/shelf/products.json cargo run -p shelfd
//! ```
//!
//! # Environment Variables
//!
//! - `SHELF_ENV`: Environment (test, development, production)
//! - `SHELF_API_HOST`: API host (default: 0.0.0.0)
//! - `SHELF_API_PORT`: API port (default: 3000)
//! - `SHELF_DATA_FILE`: Product document (default: data/products.json)
//! - `SHELF_REQUEST_LOG`: Request log (default: data/requests.log)
//! - `SHELF_EMPTY_PRICE_MIN_IS_ERROR`: Empty `priceMin` result is a 400 (default: true)

use shelfd::{Config, Daemon};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("shelfd=info".parse()?))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        api_host = %config.api.host,
        api_port = config.api.port,
        "Shelf Daemon"
    );

    let daemon = Daemon::from_config(config);
    daemon.run().await?;

    Ok(())
}
