//! User and role domain models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;

/// The fixed set of roles the client knows about.
///
/// The backend and the screens spell role names differently
/// (`SITE_ENGINEER`, `Site Engineer`, `site_engineer`); [`Role::parse`]
/// accepts all of them, and serialization always uses the backend's
/// `SCREAMING_SNAKE_CASE` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Role {
    SiteEngineer,
    PurchaseTeam,
    Director,
}

impl Role {
    /// Parses any known spelling of a role name.
    pub fn parse(s: &str) -> Option<Role> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "SITEENGINEER" => Some(Role::SiteEngineer),
            "PURCHASETEAM" => Some(Role::PurchaseTeam),
            "DIRECTOR" => Some(Role::Director),
            _ => None,
        }
    }

    /// Backend wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SiteEngineer => "SITE_ENGINEER",
            Role::PurchaseTeam => "PURCHASE_TEAM",
            Role::Director => "DIRECTOR",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SiteEngineer => "Site Engineer",
            Role::PurchaseTeam => "Purchase Team",
            Role::Director => "Director",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Role::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown role '{}'", s)))
    }
}

/// The normalized user record.
///
/// This is the shape persisted under the `user` storage key and the shape
/// every caller receives, whatever the backend actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}
