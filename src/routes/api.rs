//! Resource routes: users, skills, hardware, checkout ledger.

use crate::handlers::hardware::{
    checkout, create_hardware, get_hardware, list_hardware, return_hardware, transaction_history,
    user_transaction_history,
};
use crate::handlers::skills::{list_skills, users_by_skill};
use crate::handlers::users::{get_user, list_users, update_user};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user).put(update_user))
        .route("/skills", get(list_skills))
        .route("/users-by-skill/:skill", get(users_by_skill))
        .route("/hardware", get(list_hardware).post(create_hardware))
        .route("/hardware/:item_id", get(get_hardware))
        .route("/hardware-checkout", post(checkout))
        .route("/hardware-return", put(return_hardware))
        .route("/transaction-history", get(transaction_history))
        .route("/transaction-history/:user_id", get(user_transaction_history))
        .with_state(state)
}
