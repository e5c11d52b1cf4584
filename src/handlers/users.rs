//! User handlers: list, read, signup.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, RecordId};
use crate::model::Reference;
use crate::response::{created, ok};
use crate::service::{RequestValidator, UserService};
use crate::state::AppState;
use axum::extract::State;
use serde_json::Value;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let users = UserService::list(state.store()).await?;
    Ok(ok(users))
}

/// GET /user/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<RecordId>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user_id = user_id.or_not_found(Reference::User.not_found_message())?;
    let user = UserService::get(state.store(), user_id).await?;
    Ok(ok(user))
}

/// POST /user with body `{username, email, password}`. Every missing field is reported.
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let request = RequestValidator::create_user(&body)?;
    let user = UserService::create(state.store(), request).await?;
    Ok(created(user))
}
