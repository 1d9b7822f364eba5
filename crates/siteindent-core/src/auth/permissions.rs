//! Role-based capability table.

use crate::user::Role;
use std::collections::{BTreeSet, HashMap};

/// Sentinel capability name that grants everything.
pub const WILDCARD: &str = "*";

/// Capability names checked by the client.
pub mod capability {
    pub const APPROVE_INDENTS: &str = "approve_indents";
    pub const CREATE_ORDERS: &str = "create_orders";
    pub const VIEW_REPORTS: &str = "view_reports";
    pub const VIEW_ALL_SITES: &str = "view_all_sites";
    pub const CREATE_INDENTS: &str = "create_indents";
    pub const VIEW_OWN_INDENTS: &str = "view_own_indents";
    pub const MARK_RECEIVED: &str = "mark_received";
    pub const UPLOAD_RECEIPTS: &str = "upload_receipts";
}

/// What a role is granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// Every capability, including ones this client has never heard of.
    All,
    /// Exactly these capabilities.
    Only(BTreeSet<String>),
}

impl Grant {
    /// Builds a grant from capability names; [`WILDCARD`] anywhere yields [`Grant::All`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.contains(WILDCARD) {
            Grant::All
        } else {
            Grant::Only(names)
        }
    }

    pub fn allows(&self, capability: &str) -> bool {
        match self {
            Grant::All => true,
            Grant::Only(names) => names.contains(capability),
        }
    }
}

/// Fixed mapping from role to granted capabilities.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<Role, Grant>,
}

impl PermissionTable {
    /// The table used by the application.
    pub fn standard() -> Self {
        let mut grants = HashMap::new();
        grants.insert(Role::Director, Grant::All);
        grants.insert(
            Role::PurchaseTeam,
            Grant::from_names([
                capability::APPROVE_INDENTS,
                capability::CREATE_ORDERS,
                capability::VIEW_REPORTS,
                capability::VIEW_ALL_SITES,
            ]),
        );
        grants.insert(
            Role::SiteEngineer,
            Grant::from_names([
                capability::CREATE_INDENTS,
                capability::VIEW_OWN_INDENTS,
                capability::MARK_RECEIVED,
                capability::UPLOAD_RECEIPTS,
            ]),
        );
        Self { grants }
    }

    /// Builds a table from explicit grants; roles left out are granted nothing.
    pub fn from_grants(grants: impl IntoIterator<Item = (Role, Grant)>) -> Self {
        Self {
            grants: grants.into_iter().collect(),
        }
    }

    pub fn grant_for(&self, role: Role) -> Option<&Grant> {
        self.grants.get(&role)
    }

    pub fn allows(&self, role: Role, capability: &str) -> bool {
        self.grants
            .get(&role)
            .map(|grant| grant.allows(capability))
            .unwrap_or(false)
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}
