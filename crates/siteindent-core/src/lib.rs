//! Domain core for the SiteIndent client.
//!
//! Contains the client configuration, the domain models (indents, orders, materials, sites, reports),
//! the session model with its injected context, the authorization policy
//! (role permissions and navigation rules) and the service traits that the
//! interaction layer implements against the remote REST API.

pub mod auth;
pub mod config;
pub mod error;
pub mod indent;
pub mod material;
pub mod order;
pub mod report;
pub mod session;
pub mod site;
pub mod user;

// Re-export common error types
pub use error::{ApiError, ApiErrorKind, Result, SiteIndentError};
