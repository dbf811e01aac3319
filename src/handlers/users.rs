//! User CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::UserId;
use crate::models::{User, UserInput};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

pub const DELETED_MESSAGE: &str = "User deleted";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

pub async fn read(
    State(state): State<AppState>,
    UserId { id, raw }: UserId,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::NotFound(raw))?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Json(input) = body?;
    let user = state.store.create(&input).await?;
    tracing::info!(id = user.id, "user created");
    Ok(Json(user))
}

/// Writes unconditionally, then re-reads; an absent id surfaces on the read.
pub async fn update(
    State(state): State<AppState>,
    UserId { id, raw }: UserId,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Json(input) = body?;
    state.store.update(id, &input).await?;
    let user = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::NotFound(raw))?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<AppState>,
    UserId { id, raw }: UserId,
) -> Result<Json<&'static str>, AppError> {
    if state.store.get(id).await?.is_none() {
        return Err(AppError::NotFound(raw));
    }
    // A concurrent delete may win between the check and the statement.
    if state.store.delete(id).await? == 0 {
        return Err(AppError::NotFound(raw));
    }
    tracing::info!(id, "user deleted");
    Ok(Json(DELETED_MESSAGE))
}
