//! Dance floor relay server.
//!
//! Configuration comes from the environment:
//!
//! - `DANCEFLOOR_ADDR`: listen address (default `0.0.0.0:1337`)
//! - `DANCEFLOOR_COMMAND_BUFFER`: floor command queue size (default 64)
//! - `RUST_LOG`: log filter (default `info`)

use dancefloor::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(addr = %config.bind_addr, "starting dance floor");

    let server = DanceFloorServer::builder()
        .config(config)
        .build(TracingSink)
        .await?;

    server.run().await?;
    Ok(())
}
