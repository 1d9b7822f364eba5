//! Injected session context.

use super::model::Session;
use crate::user::Role;
use std::sync::Arc;
use tokio::sync::watch;

/// Whether a session is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Explicitly owned holder of "who is using the app right now".
///
/// Cloning a `SessionContext` yields another handle to the same state; it is
/// created once at process start and handed to every component that needs
/// it (the API client reads the bearer token from it, the session manager
/// writes it, observers subscribe to changes).
#[derive(Clone)]
pub struct SessionContext {
    sender: Arc<watch::Sender<Option<Arc<Session>>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns the current session, if any.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.sender.borrow().clone()
    }

    pub fn state(&self) -> AuthState {
        if self.sender.borrow().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// The bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.sender
            .borrow()
            .as_ref()
            .map(|session| session.auth_token().to_string())
    }

    pub fn role(&self) -> Option<Role> {
        self.sender.borrow().as_ref().map(|session| session.role)
    }

    /// Adopts a session and notifies observers.
    pub fn adopt(&self, session: Session) {
        self.sender.send_replace(Some(Arc::new(session)));
    }

    /// Drops the current session and notifies observers.
    ///
    /// Returns `true` if a session was held.
    pub fn clear(&self) -> bool {
        self.sender.send_replace(None).is_some()
    }

    /// Subscribes to session changes.
    ///
    /// The receiver observes every `adopt` and `clear`, including repeated
    /// clears, so navigation guards can re-evaluate after each transition.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.sender.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    fn session() -> Session {
        Session::new(
            "tok",
            User {
                id: "u1".to_string(),
                name: "Meera".to_string(),
                email: "meera@example.com".to_string(),
                role: Role::Director,
                site_id: None,
                site_name: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_context_is_unauthenticated() {
        let context = SessionContext::new();
        assert_eq!(context.state(), AuthState::Unauthenticated);
        assert!(context.token().is_none());
        assert!(context.role().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::new();
        let handle = context.clone();
        context.adopt(session());

        assert!(handle.is_authenticated());
        assert_eq!(handle.token().as_deref(), Some("tok"));
        assert_eq!(handle.role(), Some(Role::Director));

        assert!(handle.clear());
        assert!(!context.is_authenticated());
        assert!(!context.clear());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let context = SessionContext::new();
        let mut receiver = context.subscribe();

        context.adopt(session());
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_some());

        context.clear();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_none());
    }
}
