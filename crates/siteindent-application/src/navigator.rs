//! Route guard bound to the live session.

use siteindent_core::auth::{NavItem, NavigationDecision, NavigationPolicy, visible_nav_items};
use siteindent_core::session::{Session, SessionContext};
use std::sync::Arc;
use tokio::sync::watch;

/// Tracks the current route and keeps it legal for the current session.
///
/// The policy is evaluated on every [`navigate`](Self::navigate) and again
/// after every session change observed by [`session_changed`](Self::session_changed),
/// so logging out anywhere lands on the login route and logging in leaves it.
pub struct Navigator {
    policy: NavigationPolicy,
    context: SessionContext,
    receiver: watch::Receiver<Option<Arc<Session>>>,
    route: String,
}

impl Navigator {
    /// Starts on `initial_route`, adjusted for the current session.
    pub fn new(policy: NavigationPolicy, context: SessionContext, initial_route: &str) -> Self {
        let receiver = context.subscribe();
        let mut navigator = Self {
            policy,
            context,
            receiver,
            route: String::new(),
        };
        navigator.navigate(initial_route);
        navigator
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Navigates to `target` and returns the route actually shown.
    pub fn navigate(&mut self, target: &str) -> &str {
        let session = self.context.current();
        let decision = self.policy.resolve(session.as_deref(), target);
        if let NavigationDecision::Redirect(to) = &decision {
            tracing::debug!("[Navigator] {} -> {}", target, to);
        }
        self.route = decision.destination(target).to_string();
        &self.route
    }

    /// Waits for the next session change and re-evaluates the current route.
    ///
    /// Returns the new route when the change forced a redirect, `None` when
    /// the current route is still allowed. Returns `None` as well once the
    /// context has been dropped.
    pub async fn session_changed(&mut self) -> Option<String> {
        if self.receiver.changed().await.is_err() {
            return None;
        }
        let session = self.receiver.borrow_and_update().clone();

        match self.policy.resolve(session.as_deref(), &self.route) {
            NavigationDecision::Allow => None,
            NavigationDecision::Redirect(to) => {
                tracing::debug!("[Navigator] Session changed: {} -> {}", self.route, to);
                self.route = to.clone();
                Some(to)
            }
        }
    }

    /// Navigation entries for the current role.
    pub fn nav_items(&self) -> Vec<&'static NavItem> {
        visible_nav_items(self.context.current().as_deref())
    }

    /// The entry highlighted for the current route.
    pub fn active_item(&self) -> Option<&'static NavItem> {
        self.nav_items()
            .into_iter()
            .find(|item| item.is_active(&self.route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteindent_core::user::{Role, User};

    fn session(role: Role) -> Session {
        Session::new(
            "tok",
            User {
                id: "u".to_string(),
                name: "U".to_string(),
                email: "u@example.com".to_string(),
                role,
                site_id: None,
                site_name: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_unauthenticated_navigation_lands_on_login() {
        let context = SessionContext::new();
        let mut navigator = Navigator::new(NavigationPolicy::standard(), context, "/indents");
        assert_eq!(navigator.route(), "/login");
        assert_eq!(navigator.navigate("/reports"), "/login");
    }

    #[test]
    fn test_role_rules_apply() {
        let context = SessionContext::new();
        context.adopt(session(Role::SiteEngineer));
        let mut navigator =
            Navigator::new(NavigationPolicy::standard(), context.clone(), "/login");

        assert_eq!(navigator.route(), "/dashboard");
        assert_eq!(navigator.navigate("/orders"), "/dashboard");
        assert_eq!(navigator.navigate("/indents/create"), "/indents/create");
        assert_eq!(navigator.active_item().map(|i| i.href), Some("/indents"));
        assert!(navigator.nav_items().iter().any(|i| i.href == "/upload"));
    }

    #[tokio::test]
    async fn test_reevaluates_after_session_changes() {
        let context = SessionContext::new();
        let mut navigator =
            Navigator::new(NavigationPolicy::standard(), context.clone(), "/login");
        assert_eq!(navigator.route(), "/login");

        context.adopt(session(Role::PurchaseTeam));
        assert_eq!(navigator.session_changed().await.as_deref(), Some("/dashboard"));

        navigator.navigate("/orders");
        context.adopt(session(Role::Director));
        assert_eq!(navigator.session_changed().await, None);

        context.clear();
        assert_eq!(navigator.session_changed().await.as_deref(), Some("/login"));
    }
}
