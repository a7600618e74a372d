/// A signed access token handed out after a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub(crate) token: String,
    pub(crate) expires_at: u64,
}

impl AuthToken {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn expires_at(&self) -> u64 {
        self.expires_at
    }
}
