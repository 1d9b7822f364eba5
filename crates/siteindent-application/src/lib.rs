//! Application layer for the SiteIndent client.
//!
//! Use cases coordinating the domain core, local storage and the API
//! adaptation layer: the session manager, the route navigator, debounced
//! material search, and the indent and order workflows.

pub mod app;
pub mod gate;
pub mod navigator;
pub mod notice;
pub mod orders;
pub mod search;
pub mod session_manager;
pub mod workflow;

pub use app::SiteIndentApp;
pub use gate::ActionGate;
pub use navigator::Navigator;
pub use notice::{Notice, NoticeLevel};
pub use orders::OrderWorkflow;
pub use search::{DebouncedSearch, SearchOutcome};
pub use session_manager::{SessionManager, SignedIn};
pub use workflow::{IndentForm, IndentWorkflow};
