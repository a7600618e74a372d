use crate::adapters::database::DbPool;
use crate::adapters::database::records::UserRow;
use crate::domain::user::UserRecord;
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::{AppError, Result};
use crate::services::user_store::UserStore;
use async_trait::async_trait;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password, version, created_at, updated_at";

/// Postgres-backed user store. The `users_email_key` unique constraint is the
/// final word on email uniqueness.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.code().as_deref() == Some("23505")
        && db_err.constraint().is_none_or(|c| c == "users_email_key")
    {
        return ValidationErrors::from(FieldError::duplicated("email")).into();
    }
    AppError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(level = "debug", skip(self, record), err)]
    async fn insert(&self, record: &UserRecord) -> Result<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, name, email, password, version) VALUES ($1, $2, $3, $4, 0) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    #[tracing::instrument(level = "debug", skip(self, record), fields(user_id = ?record.id()), err)]
    async fn replace(&self, record: &UserRecord) -> Result<UserRecord> {
        let id = record.id().ok_or(AppError::NotFound)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $5
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password)
        .bind(record.version())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if exists { Err(AppError::Conflict("User was modified concurrently".into())) } else { Err(AppError::NotFound) }
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, email), err)]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, email), err)]
    async fn count_by_email(&self, email: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
