//! Database, role and table setup used by the provisioning run.

use crate::config::DatabaseSettings;
use crate::error::ProvisionError;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;

/// Table DDL in dependency order. Idempotent.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        company VARCHAR(100) NOT NULL,
        email VARCHAR(50) NOT NULL,
        phone VARCHAR(25) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS skills (
        skill_name VARCHAR(50) PRIMARY KEY,
        frequency INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users_to_skills (
        user_id INTEGER NOT NULL REFERENCES users (user_id),
        skill_name VARCHAR(50) NOT NULL REFERENCES skills (skill_name),
        rating INTEGER NOT NULL,
        PRIMARY KEY (user_id, skill_name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hardware (
        item_id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        quantity_available INTEGER NOT NULL CHECK (quantity_available >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hardware_transactions (
        transaction_id SERIAL PRIMARY KEY,
        item_id INTEGER NOT NULL REFERENCES hardware (item_id),
        user_id INTEGER NOT NULL REFERENCES users (user_id),
        checkout_date TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
        return_date TIMESTAMPTZ
    )
    "#,
];

/// Create the five application tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Admin connection options. The database part of the URL is replaced by `database`.
pub fn admin_options(admin_url: &str, database: Option<&str>) -> Result<PgConnectOptions, ProvisionError> {
    let opts = PgConnectOptions::from_str(admin_url).map_err(|e| ProvisionError::AdminUrl(e.to_string()))?;
    Ok(match database {
        Some(db) => opts.database(db),
        None => opts,
    })
}

/// Create the login role for the server if it does not exist yet.
pub async fn ensure_role(conn: &mut PgConnection, user: &str, password: &str) -> Result<(), sqlx::Error> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(user)
        .fetch_one(&mut *conn)
        .await?;
    if !exists.0 {
        let sql = format!(
            "CREATE ROLE {} LOGIN PASSWORD {}",
            quote_ident(user),
            quote_literal(password)
        );
        sqlx::query(&sql).execute(&mut *conn).await?;
        tracing::info!(role = %user, "created role");
    }
    Ok(())
}

/// Create the application database if it does not exist yet.
pub async fn ensure_database_exists(conn: &mut PgConnection, db_name: &str) -> Result<(), sqlx::Error> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(db_name)
        .fetch_one(&mut *conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(db_name)))
            .execute(&mut *conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Row-level privileges only: the server never runs DDL.
pub async fn grant_privileges(pool: &PgPool, role: &str) -> Result<(), sqlx::Error> {
    let role = quote_ident(role);
    sqlx::query(&format!(
        "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {}",
        role
    ))
    .execute(pool)
    .await?;
    sqlx::query(&format!(
        "GRANT USAGE, SELECT ON ALL SEQUENCES IN SCHEMA public TO {}",
        role
    ))
    .execute(pool)
    .await?;
    Ok(())
}

/// Run role, database and table setup with the admin URL. Returns a pool on the
/// application database, still connected as admin, for seeding.
pub async fn provision_database(admin_url: &str, db: &DatabaseSettings) -> Result<PgPool, ProvisionError> {
    let mut admin: PgConnection = admin_options(admin_url, None)?.connect().await?;
    ensure_role(&mut admin, &db.user, &db.password).await?;
    ensure_database_exists(&mut admin, &db.name).await?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect_with(admin_options(admin_url, Some(&db.name))?)
        .await?;
    ensure_tables(&pool).await?;
    grant_privileges(&pool, &db.user).await?;
    Ok(pool)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote_ident("htn_be_db"), "\"htn_be_db\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn admin_options_swaps_database() {
        let opts = admin_options("postgres://postgres@localhost:5432/postgres", Some("htn_be_db")).unwrap();
        assert_eq!(opts.get_database(), Some("htn_be_db"));
        assert!(admin_options("not a url", None).is_err());
    }
}
