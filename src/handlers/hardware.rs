//! Hardware inventory, checkout/return, and transaction history handlers.

use crate::error::AppError;
use crate::handlers::{parse_body, parse_id};
use crate::models::{CheckoutRequest, NewHardwareItem, ReturnRequest};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{HardwareService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

pub async fn list_hardware(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let items = HardwareService::list(&state.pool).await?;
    Ok(success_many(items))
}

pub async fn get_hardware(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let item_id = parse_id(&id_str)?;
    let item = HardwareService::get(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("item requested does not exist".into()))?;
    Ok(success_one_ok(item))
}

pub async fn create_hardware(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body: NewHardwareItem = parse_body(body)?;
    let (name, quantity) = RequestValidator::new_hardware(&body)?;
    let mut conn = state.pool.acquire().await?;
    let item = HardwareService::create(&mut *conn, &name, quantity).await?;
    Ok(success_one(item))
}

pub async fn checkout(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body: CheckoutRequest = parse_body(body)?;
    let item_id = RequestValidator::require_id("item_id", body.item_id)?;
    let user_id = RequestValidator::require_id("user_id", body.user_id)?;
    let transaction = HardwareService::checkout(&state.pool, item_id, user_id).await?;
    Ok(success_one(transaction))
}

pub async fn return_hardware(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body: ReturnRequest = parse_body(body)?;
    let transaction_id = RequestValidator::require_id("transaction_id", body.transaction_id)?;
    let transaction = HardwareService::return_item(&state.pool, transaction_id).await?;
    Ok(success_one_ok(transaction))
}

pub async fn transaction_history(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = HardwareService::history(&state.pool, None).await?;
    Ok(success_many(rows))
}

pub async fn user_transaction_history(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user_id = parse_id(&id_str)?;
    let rows = HardwareService::history(&state.pool, Some(user_id)).await?;
    Ok(success_many(rows))
}
