use crate::domain::auth_session::AuthToken;
use crate::error::{AppError, Result};
use crate::services::auth_service::AuthService;
use crate::services::user_service::UserService;

#[derive(Clone, Debug)]
pub struct AccountService {
    user_service: UserService,
    auth_service: AuthService,
}

impl AccountService {
    #[must_use]
    pub const fn new(user_service: UserService, auth_service: AuthService) -> Self {
        Self { user_service, auth_service }
    }

    /// Checks an email/password pair and issues an access token.
    ///
    /// # Errors
    /// Returns `AppError::AuthError` for an unknown email or a wrong password.
    #[tracing::instrument(skip(self, email, password), fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthToken> {
        let Some(user) = self.user_service.find_by_email(email).await? else {
            tracing::warn!("Authentication failed: user not found");
            return Err(AppError::AuthError);
        };
        let user_id = user.id().ok_or(AppError::Internal)?;

        tracing::Span::current().record("user_id", tracing::field::display(user_id));

        if !self.auth_service.verify_password(password, &user.password).await? {
            tracing::warn!("Authentication failed: invalid password");
            return Err(AppError::AuthError);
        }

        let token = self.auth_service.issue_token(user_id)?;
        tracing::info!("User authenticated");
        Ok(token)
    }
}
