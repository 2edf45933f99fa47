//! API integration tests
//!
//! Run against a live server started with `SESSION_ADMIN_ID` set to the same
//! value as in the test environment (default `integration-secret`).

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5173";

fn super_admin_secret() -> String {
    std::env::var("SESSION_ADMIN_ID").unwrap_or_else(|_| "integration-secret".to_string())
}

/// Unique suffix so reruns don't collide on logins
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{}-{:x}", prefix, nanos)
}

/// Create a user as super-admin, log in, and return its session id
async fn user_session(client: &Client) -> String {
    let login = unique("user");

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("session_id", super_admin_secret())
        .json(&json!({ "name": "Integration", "login": login, "password": "secret" }))
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/user-session", BASE_URL))
        .json(&json!({ "login": login, "password": "secret" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["session_id"]
        .as_str()
        .expect("No session_id in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_anonymous_is_unauthorized() {
    let client = Client::new();

    for path in ["/admin", "/users", "/loans"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_user_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/user-session", BASE_URL))
        .json(&json!({ "login": "nobody", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_create_user_hides_password() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("session_id", super_admin_secret())
        .json(&json!({ "name": "Ana", "login": unique("ana"), "password": "secret" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let session = user_session(&client).await;

    // Create
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("session_id", &session)
        .json(&json!({
            "loaned_to": "Bruno",
            "name": "Drill",
            "category": "tools",
            "observations": "blue case",
            "final_date": "2030-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let loan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(loan["status"], "inday");
    assert_eq!(loan["borrowed_by"], session.as_str());
    let loan_id = loan["id"].as_str().expect("No loan id").to_string();

    // Listed for the owner
    let loans: Value = client
        .get(format!("{}/loans", BASE_URL))
        .header("session_id", &session)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(loans
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|l| l["id"] == loan_id.as_str()));

    // Another user cannot read it
    let intruder = user_session(&client).await;
    let response = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("session_id", &intruder)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Owner sets a custom status
    let response = client
        .put(format!("{}/loans/{}/status", BASE_URL, loan_id))
        .header("session_id", &session)
        .json(&json!({ "status": "finished" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    // Delete
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("session_id", &session)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
#[ignore]
async fn test_missing_fields_are_listed() {
    let client = Client::new();
    let session = user_session(&client).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("session_id", &session)
        .json(&json!({ "name": "Drill" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "The following fields are required: loaned_to, category, observations, final_date"
    );
}

#[tokio::test]
#[ignore]
async fn test_deactivated_user_is_not_found() {
    let client = Client::new();
    let session = user_session(&client).await;

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, session))
        .header("session_id", super_admin_secret())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = client
        .get(format!("{}/users/{}", BASE_URL, session))
        .header("session_id", super_admin_secret())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
