//! GET/PUT /users handlers.

use crate::error::AppError;
use crate::handlers::{parse_body, parse_id};
use crate::models::UserUpdate;
use crate::response::{success_many, success_one_ok};
use crate::service::{RequestValidator, UserService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

pub async fn list_users(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let users = UserService::list(&state.pool).await?;
    Ok(success_many(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user_id = parse_id(&id_str)?;
    let user = UserService::get(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user does not exist".into()))?;
    Ok(success_one_ok(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user_id = parse_id(&id_str)?;
    let body: UserUpdate = parse_body(body)?;
    RequestValidator::user_update(&body)?;
    let user = UserService::update(&state.pool, user_id, body).await?;
    Ok(success_one_ok(user))
}
