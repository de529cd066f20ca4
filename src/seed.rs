//! Bulk-load seed users and hardware from JSON arrays.

use crate::error::{AppError, ProvisionError};
use crate::models::{NewHardwareItem, NewUser};
use crate::service::{HardwareService, RequestValidator, UserService};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use std::path::Path;

pub async fn read_json_array<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, ProvisionError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(path).await.map_err(|source| ProvisionError::Io {
        path: display.clone(),
        source,
    })?;
    parse_json_array(&raw, &display)
}

fn parse_json_array<T: DeserializeOwned>(raw: &str, path: &str) -> Result<Vec<T>, ProvisionError> {
    serde_json::from_str(raw).map_err(|source| ProvisionError::Json {
        path: path.to_string(),
        source,
    })
}

/// Insert all users and their skills in one transaction. Returns the number inserted.
pub async fn load_users(pool: &PgPool, users: &[NewUser]) -> Result<usize, AppError> {
    let mut tx = pool.begin().await?;
    for user in users {
        UserService::create(&mut *tx, user).await?;
    }
    tx.commit().await?;
    tracing::info!(count = users.len(), "seeded users");
    Ok(users.len())
}

/// Insert all hardware items in one transaction. Returns the number inserted.
pub async fn load_hardware(pool: &PgPool, items: &[NewHardwareItem]) -> Result<usize, AppError> {
    let mut tx = pool.begin().await?;
    for item in items {
        let (name, quantity) = RequestValidator::new_hardware(item)?;
        HardwareService::create(&mut *tx, &name, quantity).await?;
    }
    tx.commit().await?;
    tracing::info!(count = items.len(), "seeded hardware");
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_records() {
        let raw = r#"[
            {"name": "Breanna Dillon", "company": "Jackson Ltd", "email": "lorettabrown@example.net",
             "phone": "+1-924-116-7963",
             "skills": [{"skill": "OpenCV", "rating": 1}, {"skill": "Swift", "rating": 4}]},
            {"name": "Kimberly Wilkinson", "company": "Moon, Mendoza and Carter", "email": "frederickkyle@example.org",
             "phone": "(186)579-0542"}
        ]"#;
        let users: Vec<NewUser> = parse_json_array(raw, "users.json").unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].skills.len(), 2);
        assert_eq!(users[0].skills[1].skill, "Swift");
        assert!(users[1].skills.is_empty());
    }

    #[test]
    fn parses_hardware_records() {
        let raw = r#"[{"name": "Arduino Uno", "quantity": 12}, {"name": "Oculus Quest", "quantity": 0}]"#;
        let items: Vec<NewHardwareItem> = parse_json_array(raw, "hardware.json").unwrap();
        assert_eq!(items[0].name.as_deref(), Some("Arduino Uno"));
        assert_eq!(items[1].quantity, Some(0));
    }

    #[test]
    fn reports_the_offending_file() {
        let err = parse_json_array::<NewUser>("{not json", "users.json").unwrap_err();
        assert!(err.to_string().starts_with("parsing users.json"));
    }
}
