use crate::domain::user::{UserChanges, UserRecord};
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::{AppError, Result};
use crate::services::auth_service::PasswordHashing;
use crate::services::user_store::UserStore;
use std::sync::Arc;
use uuid::Uuid;

/// Email validator: valid iff no stored record already carries `email`.
///
/// The check and the later insert are not atomic; the store's own unique
/// constraint is what settles a race between two saves.
///
/// # Errors
/// Store errors propagate unchanged.
pub async fn validate_email_uniqueness(store: &dyn UserStore, email: &str) -> Result<bool> {
    let count = store.count_by_email(email).await?;
    Ok(count == 0)
}

/// Pre-save hook: replaces a new or changed plaintext password with its hash.
///
/// No-op when the password is empty or equal to the snapshot's value.
///
/// # Errors
/// Returns `AppError::PasswordHashing` if the hasher fails; the record is left untouched
/// and must not be written.
pub async fn hash_password_on_save(
    record: &mut UserRecord,
    snapshot: Option<&UserRecord>,
    hasher: &dyn PasswordHashing,
) -> Result<()> {
    if record.password.is_empty() || !record.password_changed_since(snapshot) {
        return Ok(());
    }

    match hasher.hash_password(&record.password).await {
        Ok(hash) => {
            record.password = hash;
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, user.name = %record.name, "Error hashing the password for the user");
            Err(AppError::PasswordHashing)
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHashing>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { store, hasher }
    }

    /// # Errors
    /// See [`UserService::save`].
    pub async fn create(&self, name: String, email: String, password: String) -> Result<UserRecord> {
        self.save(UserRecord::new(name, email, password), None).await
    }

    /// Validates, hashes and persists `record`.
    ///
    /// `snapshot` is the record as last loaded from the store. For a persisted
    /// record without one, the current stored state is fetched first.
    ///
    /// # Errors
    /// `AppError::Validation` for missing fields or a duplicate email,
    /// `AppError::PasswordHashing` if hashing fails, store errors otherwise.
    #[tracing::instrument(
        skip(self, record, snapshot),
        fields(user_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn save(&self, mut record: UserRecord, snapshot: Option<&UserRecord>) -> Result<UserRecord> {
        let loaded;
        let snapshot = match (snapshot, record.id()) {
            (Some(s), _) => Some(s),
            (None, Some(id)) => {
                loaded = self.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
                Some(&loaded)
            }
            (None, None) => None,
        };

        record.normalize();
        self.validate(&record, snapshot).await?;
        hash_password_on_save(&mut record, snapshot, self.hasher.as_ref()).await?;

        let saved = if record.is_new() {
            self.store.insert(&record).await?
        } else {
            self.store.replace(&record).await?
        };

        if let Some(id) = saved.id() {
            tracing::Span::current().record("user_id", tracing::field::display(id));
        }
        tracing::info!(version = saved.version(), "User saved");

        Ok(saved)
    }

    /// Loads the stored record, applies `changes` and saves it against that snapshot.
    ///
    /// # Errors
    /// `AppError::NotFound` if no record has `id`, otherwise as [`UserService::save`].
    #[tracing::instrument(skip(self, changes), fields(user_id = %id), err(level = "warn"))]
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<UserRecord> {
        let snapshot = self.find(id).await?;
        let mut record = snapshot.clone();
        changes.apply_to(&mut record);
        self.save(record, Some(&snapshot)).await
    }

    /// # Errors
    /// `AppError::NotFound` if no record has `id`.
    pub async fn find(&self, id: Uuid) -> Result<UserRecord> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// # Errors
    /// Store errors propagate unchanged.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        self.store.find_by_email(email.trim()).await
    }

    /// # Errors
    /// `AppError::NotFound` if no record has `id`.
    #[tracing::instrument(skip(self), fields(user_id = %id), err(level = "warn"))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!("User deleted");
        Ok(())
    }

    async fn validate(&self, record: &UserRecord, snapshot: Option<&UserRecord>) -> Result<()> {
        let mut errors = ValidationErrors::default();

        if record.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }

        if record.email.is_empty() {
            errors.push(FieldError::required("email"));
        } else if record.email_changed_since(snapshot)
            && !validate_email_uniqueness(self.store.as_ref(), &record.email).await?
        {
            errors.push(FieldError::duplicated("email"));
        }

        // passwords are compared byte for byte, so whitespace is content
        if record.password.is_empty() {
            errors.push(FieldError::required("password"));
        }

        errors.into_result()?;
        Ok(())
    }
}
