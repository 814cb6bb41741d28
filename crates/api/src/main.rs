//! Listing Price Pipeline - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("loading configuration")?;
    init_logging(&config.log_level, config.log_json).context("initialising logging")?;

    info!("=== Listing Price Pipeline v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Bundle {} with {} encoding, strict_format={}",
        config.bundle_path.display(),
        config.encoding.as_str(),
        config.strict_format
    );

    run_server(config).await
}
