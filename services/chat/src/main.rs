use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod accounts;
mod chat;
mod config;
mod error;
mod gemini;
mod history;
mod models;
mod repositories;
mod routes;
mod sanitizer;
mod state;
mod validation;

#[cfg(test)]
mod testing;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    gemini::{GeminiClient, GeminiConfig},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting chat service");

    let server_config = ServerConfig::from_env();
    let gemini_config = GeminiConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let completion = Arc::new(GeminiClient::new(gemini_config));
    let app_state = AppState::new(pool.clone(), completion);

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&server_config.addr).await?;
    info!("Chat service listening on {}", server_config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down chat service");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
