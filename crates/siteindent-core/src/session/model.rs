//! Session domain model.

use crate::error::{Result, SiteIndentError};
use crate::user::{Role, User};

/// The client-held record of the authenticated user and their credential.
///
/// A `Session` can only be built through [`Session::new`], which rejects an
/// empty token, so holding one means holding a usable bearer credential.
/// The role is authoritative for every client-side access decision; the
/// server re-checks on its side.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub assigned_site_id: Option<String>,
    pub assigned_site_name: Option<String>,
    auth_token: String,
}

impl Session {
    pub fn new(auth_token: impl Into<String>, user: User) -> Result<Self> {
        let auth_token = auth_token.into();
        if auth_token.trim().is_empty() {
            return Err(SiteIndentError::security("auth token must not be empty"));
        }

        Ok(Self {
            user_id: user.id,
            display_name: user.name,
            email: user.email,
            role: user.role,
            assigned_site_id: user.site_id,
            assigned_site_name: user.site_name,
            auth_token,
        })
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// The user record for this session, as persisted under the `user` key.
    pub fn user(&self) -> User {
        User {
            id: self.user_id.clone(),
            name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role,
            site_id: self.assigned_site_id.clone(),
            site_name: self.assigned_site_name.clone(),
        }
    }

    /// Replaces the identity with a freshly verified user record, keeping the token.
    pub fn with_user(self, user: User) -> Self {
        Self {
            user_id: user.id,
            display_name: user.name,
            email: user.email,
            role: user.role,
            assigned_site_id: user.site_id,
            assigned_site_name: user.site_name,
            auth_token: self.auth_token,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("assigned_site_id", &self.assigned_site_id)
            .field("assigned_site_name", &self.assigned_site_name)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}
