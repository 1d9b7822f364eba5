//! User domain module.
//!
//! - `model`: the user record returned by the backend and the fixed [`Role`] set

mod model;

pub use model::{Role, User};
