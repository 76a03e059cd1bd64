// easylabel server - main entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use easylabel_core::Database;
use easylabel_server::{router, Config, DatasetAccessor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("starting {} v{}", easylabel_server::NAME, easylabel_server::VERSION);

    let config = Config::load().context("failed to load configuration")?;

    let db = Database::open(&config.data_dir)
        .with_context(|| format!("failed to open store at {}", config.data_dir.display()))?;
    let accessor = Arc::new(DatasetAccessor::new(
        db,
        config.data_collection.clone(),
        config.metadata_collection.clone(),
    ));

    let app = router(accessor);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
