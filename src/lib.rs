//! Skill ledger: REST backend for users, their skills, and hardware checkout.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod phone;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{render_dotenv, Settings};
pub use error::{AppError, ConfigError, ProvisionError};
pub use phone::normalize_phone;
pub use routes::app;
pub use state::AppState;
pub use store::ensure_tables;
