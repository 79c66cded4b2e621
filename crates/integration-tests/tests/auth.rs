//! Login scenarios against a live database.

use reqwest::StatusCode;
use serde_json::json;

use backoffice_core::UserRole;
use backoffice_integration_tests::{TestApp, json, unique};

const PASSWORD: &str = "correct horse battery staple";

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_login_with_valid_credentials() {
    let app = TestApp::spawn().await;
    let email = format!("{}@example.com", unique("login"));
    let user = app.seed_user(&email, PASSWORD, UserRole::Admin).await;

    let resp = app
        .post("/auth/login", &json!({"email": email, "password": PASSWORD}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body["user"]["accountNo"], user.id.to_string());
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["role"], json!(["admin"]));
    assert!(body["user"]["exp"].as_i64().is_some_and(|exp| exp > 0));
    assert!(body["accessToken"].as_str().is_some_and(|token| !token.is_empty()));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_login_with_wrong_password() {
    let app = TestApp::spawn().await;
    let email = format!("{}@example.com", unique("badpw"));
    app.seed_user(&email, PASSWORD, UserRole::Cashier).await;

    let resp = app
        .post("/auth/login", &json!({"email": email, "password": "wrong"}))
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json(resp).await;
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
    assert!(body.get("accessToken").is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_login_with_unknown_email() {
    let app = TestApp::spawn().await;

    let resp = app
        .post(
            "/auth/login",
            &json!({"email": format!("{}@example.com", unique("nobody")), "password": PASSWORD}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json(resp).await["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_readiness() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/health/ready").await.status(), StatusCode::OK);
}
