use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{ensure_absent, find, now, AppState};
use crate::error::AppError;
use crate::models::{User, UserRequest};

const ENTITY: &str = "User";

/// GET /user/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = find(state.store.users.as_ref(), user_id, ENTITY)?;
    if !user.is_active {
        return Err(AppError::NotFound("User is deactivated".to_string()));
    }
    Ok(Json(user))
}

/// POST /user/:user_id
pub async fn create_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    ensure_absent(state.store.users.as_ref(), user_id, ENTITY)?;
    let Json(request) = payload?;

    Ok((StatusCode::CREATED, Json(insert_user(&state, user_id, request))))
}

/// PUT /user/:user_id
///
/// Creates the user if the id is free, otherwise replaces its editable fields.
pub async fn put_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(request) = payload?;

    if !state.store.users.exists(user_id) {
        return Ok((StatusCode::CREATED, Json(insert_user(&state, user_id, request))));
    }

    let timestamp = now();
    let mut request = Some(request);
    state.store.users.update(user_id, &mut |user| {
        if let Some(request) = request.take() {
            request.apply_to(user, timestamp);
        }
    });

    let user = find(state.store.users.as_ref(), user_id, ENTITY)?;
    info!(user_id, "Updated user");
    Ok((StatusCode::OK, Json(user)))
}

/// DELETE /user/:user_id
///
/// Soft delete: the record stays but reads report it as missing.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let timestamp = now();
    let found = state.store.users.update(user_id, &mut |user| {
        user.is_active = false;
        user.updated_at = timestamp;
    });
    if !found {
        return Err(AppError::NotFound(format!("{} id not found", ENTITY)));
    }

    info!(user_id, "Deactivated user");
    Ok(StatusCode::NO_CONTENT)
}

fn insert_user(state: &AppState, user_id: i64, request: UserRequest) -> User {
    let user = request.into_user(user_id, now());
    state.store.users.insert(user_id, user.clone());
    info!(user_id, customer_type = ?user.customer_type, "Created user");
    user
}
