//! Administrator management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{admin::AdminRequest, Admin, MessageResponse},
    AppState,
};

use super::{Payload, Session};

/// List administrators
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "All administrators", body = Vec<Admin>),
        (status = 401, description = "Super-admin session required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_admins(
    State(state): State<AppState>,
    Session(identity): Session,
) -> AppResult<Json<Vec<Admin>>> {
    let admins = state.services.admins.list(&identity).await?;
    Ok(Json(admins))
}

/// Get administrator details by ID
#[utoipa::path(
    get,
    path = "/admin/{id}",
    tag = "admin",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "Administrator details", body = Admin),
        (status = 401, description = "Not this administrator's session", body = crate::error::ErrorResponse),
        (status = 404, description = "Administrator not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_admin(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<Json<Admin>> {
    let admin = state.services.admins.get(&identity, &id).await?;
    Ok(Json(admin))
}

/// Create a new administrator
#[utoipa::path(
    post,
    path = "/admin",
    tag = "admin",
    security(("session_id" = [])),
    request_body = AdminRequest,
    responses(
        (status = 201, description = "Administrator created", body = Admin),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Super-admin session required", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_admin(
    State(state): State<AppState>,
    Session(identity): Session,
    Payload(request): Payload<AdminRequest>,
) -> AppResult<(StatusCode, Json<Admin>)> {
    let created = state.services.admins.create(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an administrator
#[utoipa::path(
    put,
    path = "/admin/{id}",
    tag = "admin",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Administrator ID")
    ),
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Administrator updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Administrator not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
    Payload(request): Payload<AdminRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.admins.update(&identity, &id, request).await?;
    Ok(Json(MessageResponse::new(format!("Administrator {} updated", id))))
}

/// Delete an administrator
#[utoipa::path(
    delete,
    path = "/admin/{id}",
    tag = "admin",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Administrator ID")
    ),
    responses(
        (status = 202, description = "Administrator deleted", body = MessageResponse),
        (status = 401, description = "Super-admin session required", body = crate::error::ErrorResponse),
        (status = 404, description = "Administrator not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.admins.delete(&identity, &id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("Administrator {} deleted", id))),
    ))
}
