//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{user::UserRequest, MessageResponse, User},
    AppState,
};

use super::{Payload, Session};

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "All users, deactivated ones included", body = Vec<User>),
        (status = 401, description = "Administrator session required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Session(identity): Session,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&identity).await?;
    Ok(Json(users))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Not allowed to read this user", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found or deactivated", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(&identity, &id).await?;
    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("session_id" = [])),
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator session required", body = crate::error::ErrorResponse),
        (status = 409, description = "Login already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Session(identity): Session,
    Payload(request): Payload<UserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.services.users.create(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found or deactivated", body = crate::error::ErrorResponse),
        (status = 409, description = "Login already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
    Payload(request): Payload<UserRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.update(&identity, &id, request).await?;
    Ok(Json(MessageResponse::new(format!("User {} updated", id))))
}

/// Deactivate a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 202, description = "User deactivated", body = MessageResponse),
        (status = 404, description = "User not found or already deactivated", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.users.delete(&identity, &id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("User {} deactivated", id))),
    ))
}
