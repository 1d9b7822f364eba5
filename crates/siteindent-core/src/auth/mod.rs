//! Authorization policy and the authentication gateway.
//!
//! - `permissions`: capability sets per role, with an explicit wildcard grant
//! - `navigation`: route protection and role-gated navigation items
//! - `gateway`: the authentication endpoints the session manager talks to

mod gateway;
mod navigation;
mod permissions;

pub use gateway::{AuthGateway, AuthGrant, LoginCredentials};
pub use navigation::{
    LANDING_ROUTE, LOGIN_ROUTE, NAV_ITEMS, NavItem, NavigationDecision, NavigationPolicy,
    RouteRule, visible_nav_items,
};
pub use permissions::{Grant, PermissionTable, WILDCARD, capability};
