//! Authentication gateway trait.

use crate::error::ApiError;
use crate::user::User;
use async_trait::async_trait;
use serde::Serialize;

/// Credentials submitted at login.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful login: the bearer token and the normalized user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: User,
}

/// The authentication endpoints of the remote service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError>;

    /// `POST /auth/logout`, using the credential of the current session.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /auth/verify` with an explicit token.
    ///
    /// The token is passed in rather than read from the session context
    /// because verification happens before a restored session is adopted.
    async fn verify(&self, token: &str) -> Result<User, ApiError>;
}
