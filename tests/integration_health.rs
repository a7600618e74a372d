#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;
use std::sync::Arc;
use userbase::domain::user::UserRecord;
use userbase::error::{AppError, Result};
use userbase::services::user_store::UserStore;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_livez() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_happy_path() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
}

#[derive(Debug)]
struct DownStore;

#[async_trait::async_trait]
impl UserStore for DownStore {
    async fn insert(&self, _record: &UserRecord) -> Result<UserRecord> {
        Err(AppError::Internal)
    }
    async fn replace(&self, _record: &UserRecord) -> Result<UserRecord> {
        Err(AppError::Internal)
    }
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<UserRecord>> {
        Err(AppError::Internal)
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>> {
        Err(AppError::Internal)
    }
    async fn count_by_email(&self, _email: &str) -> Result<u64> {
        Err(AppError::Internal)
    }
    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(AppError::Internal)
    }
    async fn ping(&self) -> Result<()> {
        Err(AppError::Internal)
    }
}

#[tokio::test]
async fn test_readyz_store_error() {
    let app = common::TestApp::spawn_with_store(Arc::new(DownStore)).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["store"], "error");

    // store failures surface as 500 on the public API
    assert_eq!(app.create_user("Alice", "a@example.com", "pw").await.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
