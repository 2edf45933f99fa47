//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admins, health, loans, sessions, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loan Tracker API",
        version = "1.0.0",
        description = "Track borrowed and lent items. Administrators manage user accounts, users manage their own loans.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Sessions
        sessions::admin_login,
        sessions::user_login,
        // Administrators
        admins::list_admins,
        admins::get_admin,
        admins::create_admin,
        admins::update_admin,
        admins::delete_admin,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::update_loan,
        loans::update_loan_status,
        loans::delete_loan,
    ),
    components(
        schemas(
            // Sessions
            sessions::AdminSessionResponse,
            sessions::UserSessionResponse,
            crate::models::admin::AdminLogin,
            crate::models::user::UserLogin,
            // Accounts
            crate::models::admin::Admin,
            crate::models::admin::AdminRequest,
            crate::models::user::User,
            crate::models::user::UserRequest,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanStatusRequest,
            // Health
            health::HealthResponse,
            // Responses
            crate::models::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SessionHeader),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sessions", description = "Login endpoints"),
        (name = "admin", description = "Administrator management"),
        (name = "users", description = "User management"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Declares the `session_id` header as the API key scheme
struct SessionHeader;

impl Modify for SessionHeader {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("session_id"))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/health",
            "/admin-session",
            "/user-session",
            "/admin",
            "/admin/{id}",
            "/users",
            "/users/{id}",
            "/loans",
            "/loans/{id}",
            "/loans/{id}/status",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("session_id"));
    }
}
