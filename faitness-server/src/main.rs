use anyhow::{Context, Result};
use clap::Parser;
use faitness::db::Database;
use faitness::logging::{init_logger, parse_level};
use faitness_server::config::ServerConfig;
use faitness_server::{AppState, router};
use log::{LevelFilter, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    let level = parse_level(&config.log_level).unwrap_or_else(|| {
        eprintln!("Unknown log level '{}', using info", config.log_level);
        LevelFilter::Info
    });
    init_logger(level);

    let db = Database::connect(&config.database_url, &config.pool_settings())
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    db.run_migrations()?;

    let app = router(AppState::new(db));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
