use std::path::PathBuf;

use closet_muse::{AppConfig, logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_from_path(config_path)?;
    logging::init(&config.logging)?;

    tracing::info!("Starting Closet Muse API v{}", closet_muse::VERSION);
    let state = web::build_state(&config).await?;
    web::run(&config, state).await
}
