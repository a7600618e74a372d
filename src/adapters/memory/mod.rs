use crate::domain::user::UserRecord;
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::{AppError, Result};
use crate::services::user_store::UserStore;
use async_trait::async_trait;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, UserRecord>,
    emails: HashMap<String, Uuid>, // unique index: email -> user id
}

/// Process-local user store. Both maps sit behind one lock so the unique
/// email index and the documents never disagree.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Collections>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email() -> AppError {
    ValidationErrors::from(FieldError::duplicated("email")).into()
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<UserRecord> {
        let mut inner = self.inner.lock().await;
        if inner.emails.contains_key(&record.email) {
            return Err(duplicate_email());
        }

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let stored = UserRecord {
            id: Some(id),
            version: 0,
            created_at: Some(now),
            updated_at: Some(now),
            ..record.clone()
        };

        inner.emails.insert(stored.email.clone(), id);
        inner.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, record: &UserRecord) -> Result<UserRecord> {
        let id = record.id.ok_or(AppError::NotFound)?;
        let mut inner = self.inner.lock().await;

        let current = inner.users.get(&id).ok_or(AppError::NotFound)?;
        if current.version != record.version {
            return Err(AppError::Conflict("User was modified concurrently".into()));
        }
        let old_email = current.email.clone();
        let created_at = current.created_at;

        if old_email != record.email && inner.emails.contains_key(&record.email) {
            return Err(duplicate_email());
        }

        let stored = UserRecord {
            version: record.version + 1,
            created_at,
            updated_at: Some(OffsetDateTime::now_utc()),
            ..record.clone()
        };

        inner.emails.remove(&old_email);
        inner.emails.insert(stored.email.clone(), id);
        inner.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.emails.get(email).and_then(|id| inner.users.get(id)).cloned())
    }

    async fn count_by_email(&self, email: &str) -> Result<u64> {
        Ok(u64::from(self.inner.lock().await.emails.contains_key(email)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let Some(removed) = inner.users.remove(&id) else {
            return Ok(false);
        };
        inner.emails.remove(&removed.email);
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
