#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;
use serde_json::{Value, json};

mod common;

#[tokio::test]
async fn test_create_user_hashes_password() {
    let app = common::TestApp::spawn().await;
    let email = common::unique_email("create");

    let resp = app.create_user("Alice", &email, "hunter22").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.unwrap();
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], email.as_str());

    let stored = body["password"].as_str().unwrap();
    assert_ne!(stored, "hunter22");
    assert!(stored.starts_with("$argon2"));

    // revision counter and timestamps never leave the server
    assert!(body.get("version").is_none());
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = common::TestApp::spawn().await;
    let email = common::unique_email("dup");

    assert_eq!(app.create_user("Alice", &email, "pw-one").await.status(), StatusCode::CREATED);

    let resp = app.create_user("Mallory", &email, "pw-two").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["fields"][0]["path"], "email");
    assert_eq!(body["fields"][0]["kind"], "DUPLICATED");
    assert_eq!(body["fields"][0]["message"], "already exists in the database.");
}

#[tokio::test]
async fn test_padded_email_counts_as_duplicate() {
    let app = common::TestApp::spawn().await;
    let email = common::unique_email("pad");

    app.create_user("Alice", &email, "pw").await;
    let resp = app.create_user("Alice", &format!("  {email} "), "pw").await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_fields_are_reported() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.post(format!("{}/v1/users", app.server_url)).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.unwrap();
    let paths: Vec<&str> = body["fields"].as_array().unwrap().iter().map(|f| f["path"].as_str().unwrap()).collect();
    assert_eq!(paths, ["name", "email", "password"]);
    assert!(body["fields"].as_array().unwrap().iter().all(|f| f["kind"] == "REQUIRED"));
}

#[tokio::test]
async fn test_null_fields_are_reported_as_required() {
    let app = common::TestApp::spawn().await;
    let email = common::unique_email("null");

    let resp = app
        .client
        .post(format!("{}/v1/users", app.server_url))
        .json(&json!({ "name": null, "email": email, "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.unwrap();
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["path"], "name");
    assert_eq!(fields[0]["kind"], "REQUIRED");
}

#[tokio::test]
async fn test_concurrent_signups_with_same_email() {
    let app = common::TestApp::spawn().await;
    let email = common::unique_email("race");

    let (a, b) = tokio::join!(app.create_user("A", &email, "pw-a"), app.create_user("B", &email, "pw-b"));

    let mut statuses = [a.status().as_u16(), b.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [StatusCode::CREATED.as_u16(), StatusCode::CONFLICT.as_u16()]);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/v1/users", app.server_url))
        .header("x-request-id", "req-123")
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers()["x-request-id"], "req-123");
}
