use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use tracing_subscriber::EnvFilter;

use hbnb_api::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, HBNB_ADMIN_EMAIL, etc.
    let _ = dotenvy::dotenv();

    let config = config::config().clone();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.api.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    config.validate().context("invalid configuration")?;
    tracing::info!("Starting HBnB API in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let state = AppState::new(config);
    state.seed_admin().await.context("failed to seed admin account")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("HBnB API listening on http://{}", bind_addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state)))
        .await
        .context("server error")?;

    Ok(())
}
