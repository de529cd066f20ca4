//! Load settings from the environment (after `.env`), and render the `.env`
//! file the provisioning run leaves behind for the server.

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "htn_be_admin";
pub const DEFAULT_DB_PASSWORD: &str = "not-a-good-password";
pub const DEFAULT_DB_NAME: &str = "htn_be_db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_SERVER_PORT: u16 = 3600;

impl Settings {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseSettings {
            host: text("DB_HOST", DEFAULT_DB_HOST),
            port: parse_or(get("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?,
            user: text("DB_USER", DEFAULT_DB_USER),
            password: text("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            name: text("DB_NAME", DEFAULT_DB_NAME),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        };
        let server = ServerSettings {
            host: text("SERVER_HOST", "0.0.0.0"),
            port: parse_or(get("SERVER_PORT"), "SERVER_PORT", DEFAULT_SERVER_PORT)?,
        };
        let provision = ProvisionSettings {
            admin_database_url: text("ADMIN_DATABASE_URL", "postgres://postgres@localhost:5432/postgres"),
            seed_users_path: text("SEED_USERS_PATH", "data/users.json"),
            seed_hardware_path: text("SEED_HARDWARE_PATH", "data/hardware.json"),
            dotenv_path: text("DOTENV_PATH", ".env"),
        };
        Ok(Settings {
            database,
            server,
            provision,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: v }),
    }
}

/// `.env` contents consumed by [`Settings::from_env`] on server start.
pub fn render_dotenv(db: &DatabaseSettings) -> String {
    format!(
        "DB_HOST={}\nDB_PORT={}\nDB_USER={}\nDB_PASSWORD={}\nDB_NAME={}\n",
        db.host, db.port, db.user, db.password, db.name
    )
}
