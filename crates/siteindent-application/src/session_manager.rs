//! Session and authorization manager.
//!
//! Owns the login lifecycle: restoring a persisted session at startup,
//! logging in and out, and answering role and permission questions for the
//! current user. State lives in the injected [`SessionContext`], so the API
//! client picks up the new credential on its next request and subscribers
//! are notified of every transition.

use crate::notice::{Notice, NoticeLevel, SESSION_NOT_SAVED_MESSAGE};
use siteindent_core::auth::{AuthGateway, LoginCredentials, PermissionTable};
use siteindent_core::session::{AuthState, Session, SessionContext, SessionStore};
use siteindent_core::user::Role;
use siteindent_core::{ApiError, Result, SiteIndentError};
use std::sync::Arc;
use tokio::sync::watch;

/// A successful login.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session: Arc<Session>,
    /// Set when the session could not be saved and will not survive a restart.
    pub warning: Option<Notice>,
}

pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    context: SessionContext,
    permissions: PermissionTable,
}

impl SessionManager {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        context: SessionContext,
    ) -> Self {
        Self {
            gateway,
            store,
            context,
            permissions: PermissionTable::standard(),
        }
    }

    /// Replaces the role permission table.
    pub fn with_permissions(mut self, permissions: PermissionTable) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.context.current()
    }

    pub fn state(&self) -> AuthState {
        self.context.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.context.subscribe()
    }

    /// Restores the persisted session, if the backend still accepts it.
    ///
    /// Never fails: unreadable storage, a missing half of the session, a
    /// rejected token and a network failure all end in `Unauthenticated`
    /// with storage cleared. On success the refreshed user record is
    /// written back.
    pub async fn restore_session(&self) -> AuthState {
        let persisted = match self.store.load().await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!("[SessionManager] Persisted session unreadable: {}", e);
                self.discard().await;
                return AuthState::Unauthenticated;
            }
        };

        let was_empty = persisted.is_empty();
        let Some((token, stored_user)) = persisted.into_complete() else {
            if !was_empty {
                tracing::warn!("[SessionManager] Incomplete persisted session discarded");
                self.discard().await;
            }
            return AuthState::Unauthenticated;
        };

        let user = match self.gateway.verify(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::info!(
                    "[SessionManager] Stored session for {} rejected: {} (status {})",
                    stored_user.id,
                    e.message,
                    e.status
                );
                self.discard().await;
                return AuthState::Unauthenticated;
            }
        };

        let session = match Session::new(token, user.clone()) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("[SessionManager] Restored session invalid: {}", e);
                self.discard().await;
                return AuthState::Unauthenticated;
            }
        };

        if let Err(e) = self.store.save_user(&user).await {
            tracing::warn!("[SessionManager] Failed to refresh stored user: {}", e);
        }

        tracing::info!(
            "[SessionManager] Session restored for {} ({})",
            session.user_id,
            session.role.as_str()
        );
        self.context.adopt(session);
        AuthState::Authenticated
    }

    /// Logs in and persists the session.
    ///
    /// A rejection is returned as the server sent it and leaves the current
    /// session, if any, untouched. There is no retry. Show rejections with
    /// [`Notice::from_login_error`], not [`handle_api_error`](Self::handle_api_error):
    /// a 401 here means wrong credentials, not an expired session.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn> {
        let credentials = LoginCredentials::new(email.trim(), password);
        let grant = match self.gateway.login(&credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                tracing::info!(
                    "[SessionManager] Login rejected for {}: {} (status {})",
                    credentials.email,
                    e.message,
                    e.status
                );
                return Err(e.into());
            }
        };

        let session = Session::new(grant.token.clone(), grant.user.clone())?;
        let warning = match self.store.save(&grant.token, &grant.user).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to persist session: {}", e);
                Some(Notice::new(NoticeLevel::Warning, SESSION_NOT_SAVED_MESSAGE))
            }
        };

        tracing::info!(
            "[SessionManager] Logged in {} ({})",
            session.user_id,
            session.role.as_str()
        );
        self.context.adopt(session);
        let session = self
            .current()
            .ok_or_else(|| SiteIndentError::internal("session vanished after login"))?;
        Ok(SignedIn { session, warning })
    }

    /// Logs out. Never fails.
    ///
    /// The backend is told first on a best-effort basis; local state and
    /// storage are cleared whatever it answers.
    pub async fn logout(&self) {
        if self.context.is_authenticated() {
            if let Err(e) = self.gateway.logout().await {
                tracing::debug!("[SessionManager] Logout notification failed: {}", e);
            }
        }
        self.discard().await;
        tracing::info!("[SessionManager] Logged out");
    }

    /// Turns an API failure into a notice, logging out on authentication failures.
    pub async fn handle_api_error(&self, err: &ApiError) -> Notice {
        if err.is_authentication() && self.context.is_authenticated() {
            tracing::info!("[SessionManager] Credential rejected, logging out");
            self.discard().await;
        }
        Notice::from_api_error(err)
    }

    /// Whether the current role is one of `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.context
            .role()
            .is_some_and(|role| roles.contains(&role))
    }

    /// [`has_role`](Self::has_role) with role names in any spelling.
    ///
    /// Unknown names never match.
    pub fn has_role_named<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let roles: Vec<Role> = names
            .iter()
            .filter_map(|name| Role::parse(name.as_ref()))
            .collect();
        self.has_role(&roles)
    }

    pub fn has_permission(&self, capability: &str) -> bool {
        self.context
            .role()
            .is_some_and(|role| self.permissions.allows(role, capability))
    }

    /// The current session, if it holds `capability`.
    pub fn require_permission(&self, capability: &str) -> Result<Arc<Session>> {
        let session = self.current().ok_or(SiteIndentError::NotAuthenticated)?;
        if self.permissions.allows(session.role, capability) {
            Ok(session)
        } else {
            Err(SiteIndentError::permission_denied(capability))
        }
    }

    async fn discard(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!("[SessionManager] Failed to clear stored session: {}", e);
        }
        self.context.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use siteindent_core::auth::{AuthGrant, capability};
    use siteindent_core::user::User;
    use siteindent_infrastructure::MemorySessionStore;
    use std::sync::Mutex;

    // ============================================================================
    // Mock AuthGateway
    // ============================================================================

    #[derive(Default)]
    struct MockGateway {
        user: Mutex<Option<User>>,
        logout_calls: Mutex<u32>,
        fail_logout: bool,
    }

    impl MockGateway {
        fn accepting(user: User) -> Self {
            Self {
                user: Mutex::new(Some(user)),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl AuthGateway for MockGateway {
        async fn login(
            &self,
            credentials: &LoginCredentials,
        ) -> std::result::Result<AuthGrant, ApiError> {
            match self.user.lock().unwrap().clone() {
                Some(user) if credentials.password == "secret" => Ok(AuthGrant {
                    token: "tok-1".to_string(),
                    user,
                }),
                _ => Err(ApiError::new(401, "Invalid credentials")),
            }
        }

        async fn logout(&self) -> std::result::Result<(), ApiError> {
            *self.logout_calls.lock().unwrap() += 1;
            if self.fail_logout {
                Err(ApiError::network())
            } else {
                Ok(())
            }
        }

        async fn verify(&self, token: &str) -> std::result::Result<User, ApiError> {
            match self.user.lock().unwrap().clone() {
                Some(user) if token == "tok-1" => Ok(user),
                _ => Err(ApiError::new(401, "Token expired")),
            }
        }
    }

    fn engineer() -> User {
        User {
            id: "u-1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::SiteEngineer,
            site_id: Some("site-chembur".to_string()),
            site_name: Some("Chembur Site".to_string()),
        }
    }

    fn director() -> User {
        User {
            role: Role::Director,
            site_id: None,
            site_name: None,
            ..engineer()
        }
    }

    fn manager(gateway: MockGateway, store: MemorySessionStore) -> SessionManager {
        SessionManager::new(Arc::new(gateway), Arc::new(store), SessionContext::new())
    }

    #[tokio::test]
    async fn test_login_persists_and_authenticates() {
        let store = MemorySessionStore::new();
        let manager = manager(MockGateway::accepting(engineer()), store.clone());

        let signed_in = manager.login("asha@example.com", "secret").await.unwrap();
        assert_eq!(signed_in.session.role, Role::SiteEngineer);
        assert!(signed_in.warning.is_none());
        assert_eq!(manager.state(), AuthState::Authenticated);
        assert_eq!(store.get("auth_token").await.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_failed_login_stays_unauthenticated() {
        let store = MemorySessionStore::new();
        let manager = manager(MockGateway::accepting(engineer()), store.clone());

        let err = manager.login("asha@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.as_api_error().map(|e| e.status), Some(401));
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_has_role_and_permissions() {
        let manager = manager(
            MockGateway::accepting(engineer()),
            MemorySessionStore::new(),
        );
        assert!(!manager.has_role(&[Role::SiteEngineer]));
        assert!(!manager.has_permission(capability::CREATE_INDENTS));

        manager.login("asha@example.com", "secret").await.unwrap();
        assert!(manager.has_role(&[Role::SiteEngineer, Role::Director]));
        assert!(!manager.has_role(&[Role::PurchaseTeam]));
        assert!(manager.has_role_named(&["Site Engineer"]));
        assert!(manager.has_role_named(&["site_engineer"]));
        assert!(!manager.has_role_named(&["Purchase Team", "Janitor"]));
        assert!(manager.has_permission(capability::CREATE_INDENTS));
        assert!(!manager.has_permission(capability::APPROVE_INDENTS));
        assert!(
            manager
                .require_permission(capability::VIEW_REPORTS)
                .unwrap_err()
                .is_permission_denied()
        );
    }

    #[tokio::test]
    async fn test_director_holds_every_permission() {
        let manager = manager(
            MockGateway::accepting(director()),
            MemorySessionStore::new(),
        );
        manager.login("d@example.com", "secret").await.unwrap();

        assert!(manager.has_permission(capability::APPROVE_INDENTS));
        assert!(manager.has_permission(capability::UPLOAD_RECEIPTS));
        assert!(manager.has_permission("export_everything"));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let store = MemorySessionStore::new();
        let gateway = MockGateway {
            fail_logout: true,
            ..MockGateway::accepting(engineer())
        };
        let manager = manager(gateway, store.clone());
        manager.login("asha@example.com", "secret").await.unwrap();

        manager.logout().await;
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(store.is_empty().await);
        assert_eq!(manager.restore_session().await, AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_restore_rejected_token_clears_storage() {
        let store = MemorySessionStore::new();
        store.save("stale-token", &engineer()).await.unwrap();
        let manager = manager(MockGateway::accepting(engineer()), store.clone());

        assert_eq!(manager.restore_session().await, AuthState::Unauthenticated);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_incomplete_session_is_discarded() {
        let store = MemorySessionStore::new();
        store.put("auth_token", "tok-1").await;
        let manager = manager(MockGateway::accepting(engineer()), store.clone());

        assert_eq!(manager.restore_session().await, AuthState::Unauthenticated);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_writes_back_refreshed_user() {
        let store = MemorySessionStore::new();
        store.save("tok-1", &engineer()).await.unwrap();

        let mut moved = engineer();
        moved.site_id = Some("site-thane".to_string());
        moved.site_name = Some("Thane Site".to_string());
        let manager = manager(MockGateway::accepting(moved), store.clone());

        assert_eq!(manager.restore_session().await, AuthState::Authenticated);
        let session = manager.current().unwrap();
        assert_eq!(session.assigned_site_id.as_deref(), Some("site-thane"));
        assert!(store.get("user").await.unwrap().contains("site-thane"));
    }

    #[tokio::test]
    async fn test_authentication_error_forces_logout() {
        let store = MemorySessionStore::new();
        let manager = manager(MockGateway::accepting(engineer()), store.clone());
        manager.login("asha@example.com", "secret").await.unwrap();

        let notice = manager
            .handle_api_error(&ApiError::new(422, "Bad quantity"))
            .await;
        assert_eq!(notice.message, "Bad quantity");
        assert!(manager.context().is_authenticated());

        manager
            .handle_api_error(&ApiError::new(401, "Token expired"))
            .await;
        assert!(!manager.context().is_authenticated());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejected_relogin_keeps_existing_session() {
        let store = MemorySessionStore::new();
        let manager = manager(MockGateway::accepting(director()), store.clone());
        manager.login("d@example.com", "secret").await.unwrap();

        let err = manager.login("d@example.com", "typo").await.unwrap_err();
        let notice = Notice::from_login_error(&err);
        assert_eq!(notice.message, "Invalid credentials");
        assert_eq!(notice.level, NoticeLevel::Error);

        assert!(manager.context().is_authenticated());
        assert_eq!(manager.current().unwrap().role, Role::Director);
        assert_eq!(store.get("auth_token").await.as_deref(), Some("tok-1"));
    }

    struct ReadOnlyStore;

    #[async_trait]
    impl SessionStore for ReadOnlyStore {
        async fn load(&self) -> Result<siteindent_core::session::PersistedSession> {
            Ok(Default::default())
        }

        async fn save(&self, _token: &str, _user: &User) -> Result<()> {
            Err(SiteIndentError::storage("read-only file system"))
        }

        async fn save_user(&self, _user: &User) -> Result<()> {
            Err(SiteIndentError::storage("read-only file system"))
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unsaved_login_carries_warning() {
        let manager = SessionManager::new(
            Arc::new(MockGateway::accepting(engineer())),
            Arc::new(ReadOnlyStore),
            SessionContext::new(),
        );

        let signed_in = manager.login("asha@example.com", "secret").await.unwrap();
        assert!(manager.context().is_authenticated());
        let warning = signed_in.warning.unwrap();
        assert_eq!(warning.level, NoticeLevel::Warning);
        assert_eq!(warning.message, SESSION_NOT_SAVED_MESSAGE);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let manager = manager(
            MockGateway::accepting(engineer()),
            MemorySessionStore::new(),
        );
        let mut rx = manager.subscribe();

        manager.login("asha@example.com", "secret").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        manager.logout().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
