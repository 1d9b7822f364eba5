//! API adaptation layer for the SiteIndent client.
//!
//! The only crate that speaks HTTP. It attaches the session's bearer token,
//! turns every failure into an [`ApiError`](siteindent_core::ApiError), and
//! reshapes backend payloads into domain types through the named functions
//! in [`mapping`].

pub mod api;
pub mod client;
pub mod mapping;
pub mod transport;
pub mod wire;

pub use api::SiteIndentApi;
pub use client::ApiClient;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, ScriptedTransport,
    TransportError,
};
