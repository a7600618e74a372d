use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Password};
use crate::domain::auth_session::AuthToken;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// One-way password hashing used by the pre-save hook.
#[async_trait]
pub trait PasswordHashing: Send + Sync + std::fmt::Debug {
    /// # Errors
    /// Returns an error if the hash could not be computed.
    async fn hash_password(&self, password: &str) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// # Errors
    /// Returns `AppError::PasswordHashing` if Argon2 fails, `AppError::Internal` if the blocking task dies.
    #[tracing::instrument(err, skip(self, password))]
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || Password::hash(&password)).await.map_err(|_| AppError::Internal)?
    }

    /// # Errors
    /// Returns `AppError::Internal` if the stored hash is malformed or the blocking task dies.
    #[tracing::instrument(err, skip(self, password, password_hash))]
    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || Password::verify(&password, &password_hash))
            .await
            .map_err(|_| AppError::Internal)?
    }

    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn issue_token(&self, user_id: Uuid) -> Result<AuthToken> {
        let claims = Claims::new(user_id, self.config.token_ttl_secs);
        let token = claims.encode(&self.config.jwt_secret)?;
        Ok(AuthToken { token, expires_at: claims.exp })
    }

    /// Verifies an access token and returns the user ID (subject).
    ///
    /// # Errors
    /// Returns `AppError::AuthError` if the token is invalid or expired.
    pub fn verify_token(&self, token: &str) -> Result<Uuid> {
        Ok(Claims::decode(token, &self.config.jwt_secret)?.sub)
    }
}

#[async_trait]
impl PasswordHashing for AuthService {
    async fn hash_password(&self, password: &str) -> Result<String> {
        Self::hash_password(self, password).await
    }
}
