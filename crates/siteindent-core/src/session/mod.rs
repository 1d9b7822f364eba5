//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated [`Session`] record
//! - `context`: [`SessionContext`], the injected owner of the current session
//! - `store`: [`SessionStore`], durable persistence of the session across restarts

mod context;
mod model;
mod store;

pub use context::{AuthState, SessionContext};
pub use model::Session;
pub use store::{AUTH_TOKEN_KEY, PersistedSession, SessionStore, USER_KEY};
