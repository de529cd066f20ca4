//! One-time setup: role, database, tables, seed data, and the server's `.env`.
//!
//! Run with `ADMIN_DATABASE_URL` pointing at a superuser connection.

use skill_ledger::models::{NewHardwareItem, NewUser};
use skill_ledger::seed::{load_hardware, load_users, read_json_array};
use skill_ledger::store::provision_database;
use skill_ledger::{render_dotenv, ProvisionError, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skill_ledger=info,provision=info")))
        .init();

    tracing::info!("generating...");
    let pool = provision_database(&settings.provision.admin_database_url, &settings.database).await?;

    let users: Vec<NewUser> = read_json_array(&settings.provision.seed_users_path).await?;
    load_users(&pool, &users).await?;
    let hardware: Vec<NewHardwareItem> = read_json_array(&settings.provision.seed_hardware_path).await?;
    load_hardware(&pool, &hardware).await?;
    pool.close().await;

    let path = &settings.provision.dotenv_path;
    tokio::fs::write(path, render_dotenv(&settings.database))
        .await
        .map_err(|source| ProvisionError::Io {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path, "wrote credentials");
    tracing::info!("generation complete");
    Ok(())
}
