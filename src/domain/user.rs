use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A user document.
///
/// `password` holds plaintext only while the record is in memory and unsaved;
/// once the record has been through a save it holds the stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub(crate) id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub(crate) version: i64,
    pub(crate) created_at: Option<OffsetDateTime>,
    pub(crate) updated_at: Option<OffsetDateTime>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            version: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Identifier assigned by the store, `None` until the first save.
    #[must_use]
    pub const fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Revision counter maintained by the store.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub(crate) fn normalize(&mut self) {
        let trimmed = self.email.trim();
        if trimmed.len() != self.email.len() {
            self.email = trimmed.to_string();
        }
    }

    /// True when the password differs from the last persisted state.
    /// A record with no snapshot has never been persisted, so any value counts as changed.
    #[must_use]
    pub fn password_changed_since(&self, snapshot: Option<&Self>) -> bool {
        snapshot.is_none_or(|s| s.password != self.password)
    }

    #[must_use]
    pub fn email_changed_since(&self, snapshot: Option<&Self>) -> bool {
        snapshot.is_none_or(|s| s.email != self.email)
    }
}

/// Partial update applied to a loaded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn apply_to(self, record: &mut UserRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(password) = self.password {
            record.password = password;
        }
    }
}

/// External representation of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        serialize_for_output(record)
    }
}

/// Copies the public fields, exposing the identifier as `id` and dropping
/// the revision counter and store timestamps.
#[must_use]
pub fn serialize_for_output(record: &UserRecord) -> PublicUser {
    PublicUser {
        id: record.id,
        name: record.name.clone(),
        email: record.email.clone(),
        password: record.password.clone(),
    }
}
