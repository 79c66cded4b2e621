//! User scenarios against a live database.
//!
//! Requires `DATABASE_URL`; see the crate docs.

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use backoffice_integration_tests::{TestApp, json, unique};

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_user_crud_round_trip() {
    let app = TestApp::spawn().await;
    let local = unique("crud");

    let resp = app
        .post(
            "/users",
            &json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": format!("{local}@example.com"),
                "role": "manager",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json(resp).await;
    assert_eq!(created["username"], local.as_str());
    assert_eq!(created["status"], "active");
    assert_eq!(created["role"], "manager");
    assert!(created.get("phoneNumber").is_none());
    assert!(created.get("passwordHash").is_none());

    let id = created["id"].as_str().expect("id is a string").to_owned();

    let fetched = json(app.get(&format!("/users/{id}")).await).await;
    assert_eq!(fetched, created);

    // Only the supplied fields change
    let resp = app
        .put(&format!("/users/{id}"), &json!({"phoneNumber": "+1 555 0100"}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json(resp).await;
    assert_eq!(updated["phoneNumber"], "+1 555 0100");
    assert_eq!(updated["firstName"], "Ada");
    assert_eq!(updated["role"], "manager");
    assert_eq!(updated["email"], created["email"]);

    let resp = app.delete(&format!("/users/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.get(&format!("/users/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["code"], "USER_NOT_FOUND");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_status_filter_after_update() {
    let app = TestApp::spawn().await;
    let marker = unique("flt");

    let mut ids = Vec::new();
    for suffix in ["a", "b"] {
        let body = json!({
            "firstName": "Filter",
            "lastName": suffix,
            "email": format!("{marker}{suffix}@example.com"),
        });
        let created = json(app.post("/users", &body).await).await;
        ids.push(created["id"].as_str().expect("id is a string").to_owned());
    }

    let resp = app
        .put(&format!("/users/{}", ids[0]), &json!({"status": "inactive"}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page = json(app.get(&format!("/users?status=active&username={marker}")).await).await;
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["id"], ids[1].as_str());

    let page = json(
        app.get(&format!("/users?status=active,inactive&username={marker}"))
            .await,
    )
    .await;
    assert_eq!(page["meta"]["total"], 2);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_duplicates_conflict() {
    let app = TestApp::spawn().await;
    let local = unique("dup");

    let first = json!({
        "firstName": "A",
        "lastName": "B",
        "email": format!("{local}@example.com"),
    });
    assert_eq!(app.post("/users", &first).await.status(), StatusCode::CREATED);

    let resp = app.post("/users", &first).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json(resp).await["code"], "DUPLICATE_EMAIL");

    // Same local part on another domain collides on the username
    let second = json!({
        "firstName": "A",
        "lastName": "B",
        "email": format!("{local}@example.org"),
    });
    let resp = app.post("/users", &second).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json(resp).await["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_invite_creates_invited_user() {
    let app = TestApp::spawn().await;
    let local = unique("inv");

    let resp = app
        .post(
            "/users/invite",
            &json!({"email": format!("{local}@example.com"), "role": "admin"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invited = json(resp).await;
    assert_eq!(invited["status"], "invited");
    assert_eq!(invited["role"], "admin");
    assert_eq!(invited["firstName"], "Invited");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_missing_user_is_not_found() {
    let app = TestApp::spawn().await;
    let missing = Uuid::new_v4();

    let resp = app.delete(&format!("/users/{missing}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["code"], "USER_NOT_FOUND");

    let resp = app
        .put(&format!("/users/{missing}"), &json!({"firstName": "Ghost"}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_pagination_meta() {
    let app = TestApp::spawn().await;
    let marker = unique("pg");

    for n in 0..5 {
        let body = json!({
            "firstName": "Page",
            "lastName": n.to_string(),
            "email": format!("{marker}{n}@example.com"),
        });
        assert_eq!(app.post("/users", &body).await.status(), StatusCode::CREATED);
    }

    let page = json(app.get(&format!("/users?username={marker}&pageSize=2&page=3")).await).await;
    assert_eq!(page["meta"]["total"], 5);
    assert_eq!(page["meta"]["totalPages"], 3);
    assert_eq!(page["meta"]["page"], 3);
    assert_eq!(page["data"].as_array().map(Vec::len), Some(1));

    let page = json(app.get(&format!("/users?username={marker}&page=9")).await).await;
    assert_eq!(page["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(page["meta"]["total"], 5);
}
