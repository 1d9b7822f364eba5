//! Durable session storage trait.

use crate::error::Result;
use crate::user::User;
use async_trait::async_trait;

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "user";

/// What a [`SessionStore`] had on disk.
///
/// Either half may be missing if the store was edited or partially written
/// by an older client; only a complete pair can be restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl PersistedSession {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }

    /// Returns the token and user when both are present and the token is non-empty.
    pub fn into_complete(self) -> Option<(String, User)> {
        match (self.token, self.user) {
            (Some(token), Some(user)) if !token.trim().is_empty() => Some((token, user)),
            _ => None,
        }
    }
}

/// Durable key-value persistence for the session.
///
/// The token and the user record live under [`AUTH_TOKEN_KEY`] and
/// [`USER_KEY`]; implementations write and clear both together.
/// Access is last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads whatever is persisted.
    ///
    /// # Returns
    ///
    /// - `Ok(PersistedSession)`: possibly empty
    /// - `Err(_)`: storage unreadable or the user record is corrupt
    async fn load(&self) -> Result<PersistedSession>;

    /// Persists the token and user record together.
    async fn save(&self, token: &str, user: &User) -> Result<()>;

    /// Replaces the stored user record, keeping the token.
    async fn save_user(&self, user: &User) -> Result<()>;

    /// Removes both keys.
    async fn clear(&self) -> Result<()>;
}
