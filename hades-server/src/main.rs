//! hades-server — HADES back-office service
//!
//! Long-running service that:
//! - Authenticates system administrators and branch staff (argon2 + JWT)
//! - Manages branch staff under the single-active-administrator rule
//! - Manages the product catalog, reference data and branch inventory
//! - Serves dashboard statistics to the desktop frontend

mod api;
mod auth;
mod config;
mod db;
mod error;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hades_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting hades-server (env: {})", config.environment);

    // Initialize application state (pool, migrations, bootstrap records)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("hades-server listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
