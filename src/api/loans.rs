//! Loan management endpoints
//!
//! Every route here is restricted to user sessions and to the caller's own
//! loans. Administrators have no access.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        loan::{LoanRequest, LoanStatusRequest},
        Loan, MessageResponse,
    },
    AppState,
};

use super::{Payload, Session};

/// List the caller's loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Loans owned by the caller", body = Vec<Loan>),
        (status = 401, description = "User session required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    Session(identity): Session,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list(&identity).await?;
    Ok(Json(loans))
}

/// Get one of the caller's loans
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = Loan),
        (status = 401, description = "Not your loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.get(&identity, &id).await?;
    Ok(Json(loan))
}

/// Register a new loan
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("session_id" = [])),
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan created with status inday", body = Loan),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "User session required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    Session(identity): Session,
    Payload(request): Payload<LoanRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let created = state.services.loans.create(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update loan details
#[utoipa::path(
    put,
    path = "/loans/{id}",
    tag = "loans",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Loan ID")
    ),
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Loan updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Not your loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_loan(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
    Payload(request): Payload<LoanRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.loans.update(&identity, &id, request).await?;
    Ok(Json(MessageResponse::new(format!("Loan {} updated", id))))
}

/// Set a loan's status
#[utoipa::path(
    put,
    path = "/loans/{id}/status",
    tag = "loans",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Loan ID")
    ),
    request_body = LoanStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Missing or empty status", body = crate::error::ErrorResponse),
        (status = 401, description = "Not your loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_loan_status(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
    Payload(request): Payload<LoanStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .loans
        .update_status(&identity, &id, request)
        .await?;
    Ok(Json(MessageResponse::new(format!("Loan {} status updated", id))))
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    security(("session_id" = [])),
    params(
        ("id" = String, Path, description = "Loan ID")
    ),
    responses(
        (status = 202, description = "Loan deleted", body = MessageResponse),
        (status = 401, description = "Not your loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_loan(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.loans.delete(&identity, &id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("Loan {} deleted", id))),
    ))
}
