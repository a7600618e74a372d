use crate::domain::auth_session::AuthToken;
use crate::domain::user::UserChanges;
use serde::{Deserialize, Serialize};

/// Absent and `null` fields both reach the validator as empty strings, so
/// they are reported as `REQUIRED` instead of the body being rejected outright.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUser> for UserChanges {
    fn from(payload: UpdateUser) -> Self {
        Self { name: payload.name, email: payload.email, password: payload.password }
    }
}

#[derive(Debug, Deserialize)]
pub struct Authenticate {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    pub token: String,
    pub expires_at: u64,
}

impl From<AuthToken> for AuthTokenResponse {
    fn from(token: AuthToken) -> Self {
        Self { token: token.token, expires_at: token.expires_at }
    }
}
