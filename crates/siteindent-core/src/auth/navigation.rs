//! Route protection and role-gated navigation.

use crate::session::Session;
use crate::user::Role;

/// The only public route.
pub const LOGIN_ROUTE: &str = "/login";

/// Where authenticated users land.
pub const LANDING_ROUTE: &str = "/dashboard";

/// Outcome of evaluating a navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(String),
}

impl NavigationDecision {
    /// The route the user ends up on.
    pub fn destination<'a>(&'a self, target: &'a str) -> &'a str {
        match self {
            NavigationDecision::Allow => target,
            NavigationDecision::Redirect(route) => route,
        }
    }
}

/// A route (and everything below it) reserved for some roles.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub route: String,
    pub roles: Vec<Role>,
    /// Where to send users whose role is not listed.
    pub fallback: String,
}

impl RouteRule {
    fn covers(&self, route: &str) -> bool {
        route == self.route
            || route
                .strip_prefix(self.route.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Decides where a navigation attempt ends up.
///
/// Unauthenticated users are sent to the login route from anywhere else;
/// authenticated users are sent from the login route to the landing route;
/// role rules then keep users out of pages their role cannot use.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    login_route: String,
    landing_route: String,
    rules: Vec<RouteRule>,
}

impl NavigationPolicy {
    pub fn new(login_route: impl Into<String>, landing_route: impl Into<String>) -> Self {
        Self {
            login_route: normalize_route(&login_route.into()),
            landing_route: normalize_route(&landing_route.into()),
            rules: Vec::new(),
        }
    }

    /// The policy used by the application: default routes and role rules.
    pub fn standard() -> Self {
        Self::with_standard_rules(LOGIN_ROUTE, LANDING_ROUTE)
    }

    /// Configured routes with the application's role rules.
    pub fn with_standard_rules(
        login_route: impl Into<String>,
        landing_route: impl Into<String>,
    ) -> Self {
        let policy = Self::new(login_route, landing_route);
        let landing = policy.landing_route.clone();
        policy
            .with_rule("/indents/create", &[Role::SiteEngineer], "/indents")
            .with_rule("/orders", &[Role::PurchaseTeam, Role::Director], &landing)
            .with_rule("/reports", &[Role::PurchaseTeam, Role::Director], &landing)
            .with_rule("/upload", &[Role::SiteEngineer], &landing)
    }

    pub fn with_rule(mut self, route: &str, roles: &[Role], fallback: &str) -> Self {
        self.rules.push(RouteRule {
            route: normalize_route(route),
            roles: roles.to_vec(),
            fallback: normalize_route(fallback),
        });
        self
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    pub fn is_public(&self, route: &str) -> bool {
        normalize_route(route) == self.login_route
    }

    /// Evaluates a navigation to `target` for the given session.
    pub fn resolve(&self, session: Option<&Session>, target: &str) -> NavigationDecision {
        let route = normalize_route(target);

        let Some(session) = session else {
            if route == self.login_route {
                return NavigationDecision::Allow;
            }
            return NavigationDecision::Redirect(self.login_route.clone());
        };

        if route == self.login_route {
            return NavigationDecision::Redirect(self.landing_route.clone());
        }

        // Most specific rule wins
        let rule = self
            .rules
            .iter()
            .filter(|rule| rule.covers(&route))
            .max_by_key(|rule| rule.route.len());

        match rule {
            Some(rule) if !rule.roles.contains(&session.role) => {
                NavigationDecision::Redirect(rule.fallback.clone())
            }
            _ => NavigationDecision::Allow,
        }
    }
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strips the query string, fragment and trailing slash.
fn normalize_route(route: &str) -> String {
    let path = route.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// An entry of the bottom navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    /// `None` means visible to every role.
    pub roles: Option<&'static [Role]>,
}

impl NavItem {
    /// Whether this item is highlighted while `pathname` is shown.
    pub fn is_active(&self, pathname: &str) -> bool {
        let pathname = normalize_route(pathname);
        pathname == self.href
            || (self.href != LANDING_ROUTE && pathname.starts_with(self.href))
    }

    fn visible_to(&self, role: Role) -> bool {
        self.roles.is_none_or(|roles| roles.contains(&role))
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/dashboard",
        label: "Dashboard",
        roles: None,
    },
    NavItem {
        href: "/indents",
        label: "Indents",
        roles: None,
    },
    NavItem {
        href: "/orders",
        label: "Orders",
        roles: Some(&[Role::PurchaseTeam, Role::Director]),
    },
    NavItem {
        href: "/reports",
        label: "Reports",
        roles: Some(&[Role::PurchaseTeam, Role::Director]),
    },
    NavItem {
        href: "/upload",
        label: "Upload",
        roles: Some(&[Role::SiteEngineer]),
    },
    NavItem {
        href: "/settings",
        label: "Settings",
        roles: None,
    },
];

/// Navigation items shown to the session's role; none when signed out.
pub fn visible_nav_items(session: Option<&Session>) -> Vec<&'static NavItem> {
    match session {
        Some(session) => NAV_ITEMS
            .iter()
            .filter(|item| item.visible_to(session.role))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    fn session(role: Role) -> Session {
        Session::new(
            "tok",
            User {
                id: "u1".to_string(),
                name: "Test".to_string(),
                email: "t@example.com".to_string(),
                role,
                site_id: None,
                site_name: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        let policy = NavigationPolicy::standard();
        assert_eq!(
            policy.resolve(None, "/indents"),
            NavigationDecision::Redirect("/login".to_string())
        );
        assert_eq!(
            policy.resolve(None, "/"),
            NavigationDecision::Redirect("/login".to_string())
        );
        assert_eq!(policy.resolve(None, "/login"), NavigationDecision::Allow);
        assert_eq!(policy.resolve(None, "/login?next=/orders"), NavigationDecision::Allow);
    }

    #[test]
    fn test_authenticated_leaves_login() {
        let policy = NavigationPolicy::standard();
        let director = session(Role::Director);
        assert_eq!(
            policy.resolve(Some(&director), "/login/"),
            NavigationDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(policy.resolve(Some(&director), "/orders/o-1"), NavigationDecision::Allow);
    }

    #[test]
    fn test_role_rules() {
        let policy = NavigationPolicy::standard();
        let engineer = session(Role::SiteEngineer);
        let purchase = session(Role::PurchaseTeam);

        assert_eq!(
            policy.resolve(Some(&engineer), "/orders"),
            NavigationDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(policy.resolve(Some(&engineer), "/upload"), NavigationDecision::Allow);
        assert_eq!(policy.resolve(Some(&engineer), "/indents/create"), NavigationDecision::Allow);

        assert_eq!(
            policy.resolve(Some(&purchase), "/indents/create"),
            NavigationDecision::Redirect("/indents".to_string())
        );
        assert_eq!(policy.resolve(Some(&purchase), "/indents"), NavigationDecision::Allow);
        assert_eq!(policy.resolve(Some(&purchase), "/reports"), NavigationDecision::Allow);
        // "/ordersX" is not under "/orders"
        assert_eq!(policy.resolve(Some(&engineer), "/ordersX"), NavigationDecision::Allow);
    }

    #[test]
    fn test_destination() {
        let decision = NavigationDecision::Redirect("/login".to_string());
        assert_eq!(decision.destination("/orders"), "/login");
        assert_eq!(NavigationDecision::Allow.destination("/orders"), "/orders");
    }

    #[test]
    fn test_visible_nav_items_by_role() {
        let labels = |role| -> Vec<&str> {
            visible_nav_items(Some(&session(role)))
                .into_iter()
                .map(|item| item.label)
                .collect()
        };

        assert_eq!(
            labels(Role::SiteEngineer),
            vec!["Dashboard", "Indents", "Upload", "Settings"]
        );
        assert_eq!(
            labels(Role::PurchaseTeam),
            vec!["Dashboard", "Indents", "Orders", "Reports", "Settings"]
        );
        assert!(visible_nav_items(None).is_empty());
    }

    #[test]
    fn test_nav_item_active_matching() {
        let dashboard = &NAV_ITEMS[0];
        let indents = &NAV_ITEMS[1];
        assert!(dashboard.is_active("/dashboard"));
        assert!(!dashboard.is_active("/dashboard/extra"));
        assert!(indents.is_active("/indents/create"));
        assert!(!indents.is_active("/orders"));
    }
}
