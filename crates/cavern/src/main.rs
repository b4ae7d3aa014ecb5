//! The `cavern` binary: a CaveHunt server configured from the environment.

use cavern::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        bind = %config.bind,
        caves = config.cave.caves,
        pits = config.cave.pits,
        bats = config.cave.bats,
        arrows = config.cave.arrows,
        seed = ?config.cave.seed,
        "configuration loaded"
    );

    let server = CavernServer::builder()
        .bind(&config.bind.to_string())
        .build::<CaveHunt>(config.cave)
        .await?;
    server.run().await?;

    Ok(())
}
