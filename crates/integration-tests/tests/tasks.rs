//! Task scenarios against a live database.

use reqwest::StatusCode;
use serde_json::json;

use backoffice_integration_tests::{TestApp, json, unique};

fn is_task_id(id: &str) -> bool {
    id.strip_prefix("TASK-")
        .is_some_and(|n| n.len() >= 4 && n.chars().all(|c| c.is_ascii_digit()))
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_create_task_assigns_sequential_id() {
    let app = TestApp::spawn().await;
    let title = unique("Write release notes ");

    let resp = app
        .post(
            "/tasks",
            &json!({"title": title, "status": "todo", "label": "feature", "priority": "high"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task = json(resp).await;

    let id = task["id"].as_str().expect("id is a string");
    assert!(is_task_id(id), "unexpected task id {id}");
    assert_eq!(task["title"], title.as_str());
    assert_eq!(task["status"], "todo");
    assert_eq!(task["label"], "feature");
    assert_eq!(task["priority"], "high");
    assert!(task["createdAt"].is_string());
    assert!(task["updatedAt"].is_string());
    assert!(task.get("assignee").is_none());
    assert!(task.get("dueDate").is_none());

    let fetched = json(app.get(&format!("/tasks/{id}")).await).await;
    assert_eq!(fetched, task);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::spawn().await;
    let title = unique("Triage ");

    let task = json(
        app.post(
            "/tasks",
            &json!({
                "title": title,
                "status": "backlog",
                "label": "bug",
                "priority": "medium",
                "assignee": "sam",
                "description": "Flaky login test",
            }),
        )
        .await,
    )
    .await;
    let id = task["id"].as_str().expect("id is a string");

    let resp = app
        .put(&format!("/tasks/{id}"), &json!({"status": "in progress"}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json(resp).await;
    assert_eq!(updated["status"], "in progress");
    assert_eq!(updated["title"], task["title"]);
    assert_eq!(updated["label"], "bug");
    assert_eq!(updated["priority"], "medium");
    assert_eq!(updated["assignee"], "sam");
    assert_eq!(updated["description"], "Flaky login test");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_list_filters_and_pages() {
    let app = TestApp::spawn().await;
    let marker = unique("batch");

    let seeds = [
        ("todo", "high"),
        ("todo", "low"),
        ("done", "high"),
        ("in progress", "critical"),
        ("todo", "critical"),
    ];
    for (n, (status, priority)) in seeds.into_iter().enumerate() {
        let body = json!({
            "title": format!("{marker} #{n}"),
            "status": status,
            "label": "feature",
            "priority": priority,
        });
        assert_eq!(app.post("/tasks", &body).await.status(), StatusCode::CREATED);
    }

    let page = json(
        app.get(&format!("/tasks?filter={marker}&status=todo&priority=high,critical"))
            .await,
    )
    .await;
    assert_eq!(page["meta"]["total"], 2);

    let page = json(
        app.get(&format!("/tasks?filter={marker}&status=in%20progress"))
            .await,
    )
    .await;
    assert_eq!(page["meta"]["total"], 1);

    let page = json(app.get(&format!("/tasks?filter={marker}&pageSize=2")).await).await;
    assert_eq!(page["meta"]["total"], 5);
    assert_eq!(page["meta"]["totalPages"], 3);
    assert_eq!(page["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_delete_task() {
    let app = TestApp::spawn().await;

    let task = json(
        app.post(
            "/tasks",
            &json!({"title": unique("Tmp "), "status": "todo", "label": "bug", "priority": "low"}),
        )
        .await,
    )
    .await;
    let id = task["id"].as_str().expect("id is a string");

    assert_eq!(app.delete(&format!("/tasks/{id}")).await.status(), StatusCode::NO_CONTENT);

    let resp = app.delete(&format!("/tasks/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["code"], "TASK_NOT_FOUND");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_blank_title_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .post(
            "/tasks",
            &json!({"title": "   ", "status": "todo", "label": "bug", "priority": "low"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["code"], "BAD_REQUEST");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_page_past_the_end_of_a_huge_page_size_is_empty() {
    let app = TestApp::spawn().await;

    let resp = app.get("/tasks?page=4294967295&pageSize=4294967295").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json(resp).await;
    assert_eq!(page["data"], json!([]));
    assert_eq!(page["meta"]["page"], 4_294_967_295_u64);
    assert_eq!(page["meta"]["pageSize"], 4_294_967_295_u64);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_blank_title_update_is_rejected() {
    let app = TestApp::spawn().await;
    let title = unique("Keep me ");

    let task = json(
        app.post(
            "/tasks",
            &json!({"title": title, "status": "todo", "label": "bug", "priority": "low"}),
        )
        .await,
    )
    .await;
    let id = task["id"].as_str().expect("id is a string");

    let resp = app.put(&format!("/tasks/{id}"), &json!({"title": "  "})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["code"], "BAD_REQUEST");

    let fetched = json(app.get(&format!("/tasks/{id}")).await).await;
    assert_eq!(fetched["title"], title.as_str());
}
