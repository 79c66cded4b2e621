//! App catalogue scenarios against a live database.

use reqwest::StatusCode;

use backoffice_integration_tests::{TestApp, json, unique};

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_connect_then_disconnect() {
    let app = TestApp::spawn().await;
    let id = unique("app-");
    app.seed_app(&id).await;

    let resp = app.post(&format!("/apps/{id}/connect"), &serde_json::json!({})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let connected = json(resp).await;
    assert_eq!(connected["id"], id.as_str());
    assert_eq!(connected["connected"], true);
    assert_eq!(connected["desc"], "Integration test app");
    assert!(connected.get("logo").is_none());

    let page = json(app.get(&format!("/apps?type=connected&filter={id}")).await).await;
    assert_eq!(page["meta"]["total"], 1);
    let page = json(app.get(&format!("/apps?type=notConnected&filter={id}")).await).await;
    assert_eq!(page["meta"]["total"], 0);

    let resp = app.post(&format!("/apps/{id}/disconnect"), &serde_json::json!({})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["connected"], false);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_sorted_listing() {
    let app = TestApp::spawn().await;
    let marker = unique("srt");
    for suffix in ["b", "c", "a"] {
        app.seed_app(&format!("{marker}-{suffix}")).await;
    }

    let page = json(app.get(&format!("/apps?filter={marker}&sort=desc")).await).await;
    let names: Vec<_> = page["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .map(|app| app["name"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(
        names,
        [format!("{marker}-c"), format!("{marker}-b"), format!("{marker}-a")]
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL instance"]
async fn test_unknown_app_is_not_found() {
    let app = TestApp::spawn().await;

    let resp = app
        .post(&format!("/apps/{}/connect", unique("missing-")), &serde_json::json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["code"], "APP_NOT_FOUND");
}
