//! HTTP server: reads `DB_*` settings, opens the pool, serves the API.

use skill_ledger::{app, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skill_ledger=info,tower_http=info")),
        )
        .init();

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect_with(settings.database.connect_options())
        .await?;
    tracing::info!(
        host = %settings.database.host,
        database = %settings.database.name,
        "connected to database"
    );

    let listener = TcpListener::bind(settings.server.bind_address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState { pool })).await?;
    Ok(())
}
