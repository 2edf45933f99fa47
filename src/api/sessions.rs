//! Login endpoints
//!
//! A successful login hands back the account id, which the client then sends
//! as the `session_id` header.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{admin::AdminLogin, user::UserLogin, Admin, User},
    AppState,
};

use super::Payload;

/// Administrator login response
#[derive(Serialize, ToSchema)]
pub struct AdminSessionResponse {
    /// Value for the `session_id` header
    pub session_id: String,
    pub account: Admin,
}

/// User login response
#[derive(Serialize, ToSchema)]
pub struct UserSessionResponse {
    /// Value for the `session_id` header
    pub session_id: String,
    pub account: User,
}

/// Open an administrator session
#[utoipa::path(
    post,
    path = "/admin-session",
    tag = "sessions",
    request_body = AdminLogin,
    responses(
        (status = 200, description = "Login successful", body = AdminSessionResponse),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Payload(request): Payload<AdminLogin>,
) -> AppResult<Json<AdminSessionResponse>> {
    let admin = state.services.sessions.login_admin(request).await?;
    Ok(Json(AdminSessionResponse {
        session_id: admin.id.clone(),
        account: admin,
    }))
}

/// Open a user session
#[utoipa::path(
    post,
    path = "/user-session",
    tag = "sessions",
    request_body = UserLogin,
    responses(
        (status = 200, description = "Login successful", body = UserSessionResponse),
        (status = 400, description = "Missing login or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials or deactivated account", body = crate::error::ErrorResponse)
    )
)]
pub async fn user_login(
    State(state): State<AppState>,
    Payload(request): Payload<UserLogin>,
) -> AppResult<Json<UserSessionResponse>> {
    let user = state.services.sessions.login_user(request).await?;
    Ok(Json(UserSessionResponse {
        session_id: user.id.clone(),
        account: user,
    }))
}
