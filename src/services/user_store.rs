use crate::domain::user::UserRecord;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Document store holding user records.
///
/// Implementations must enforce email uniqueness themselves and report a
/// violation as a `DUPLICATED` validation error on `email`, so a racing pair
/// of saves that both pass validation still cannot both persist.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Persists a new record, assigning its identifier and revision 0.
    ///
    /// # Errors
    /// Returns `AppError::Validation` on a duplicate email, or a driver error.
    async fn insert(&self, record: &UserRecord) -> Result<UserRecord>;

    /// Overwrites an existing record if its revision still matches, bumping the revision.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the record is gone, `AppError::Conflict` if the
    /// revision moved, `AppError::Validation` on a duplicate email.
    async fn replace(&self, record: &UserRecord) -> Result<UserRecord>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn count_by_email(&self, email: &str) -> Result<u64>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn ping(&self) -> Result<()>;
}
