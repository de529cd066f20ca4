//! GET /skills and GET /users-by-skill/:skill.

use crate::error::AppError;
use crate::models::FrequencyRange;
use crate::response::success_many;
use crate::service::SkillService;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use std::collections::HashMap;

fn frequency_param(params: &HashMap<String, String>, key: &str) -> Result<Option<i32>, AppError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be an integer", key))),
    }
}

pub(crate) fn frequency_range(params: &HashMap<String, String>) -> Result<FrequencyRange, AppError> {
    Ok(FrequencyRange {
        min: frequency_param(params, "min_frequency")?,
        max: frequency_param(params, "max_frequency")?,
    })
}

pub async fn list_skills(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let range = frequency_range(&params)?;
    let skills = SkillService::list(&state.pool, range).await?;
    Ok(success_many(skills))
}

pub async fn users_by_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let users = SkillService::users_by_skill(&state.pool, &skill).await?;
    Ok(success_many(users))
}
