//! Local persistence for the SiteIndent client.
//!
//! Resolves platform paths, loads the client configuration, and stores the
//! session across restarts.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::{PathError, SiteIndentPaths};
pub use crate::session_store::{FileSessionStore, MemorySessionStore};
pub use crate::storage::{AtomicFile, FileFormat, StorageError};
