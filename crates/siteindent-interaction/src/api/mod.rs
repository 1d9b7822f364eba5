//! Implementations of the core service traits over [`ApiClient`].
//!
//! One struct, [`SiteIndentApi`], serves every endpoint group; each group's
//! trait implementation lives in its own file.

mod auth;
mod catalog;
mod indents;
mod orders;
mod reports;

use crate::client::ApiClient;
use siteindent_core::ApiError;
use siteindent_core::session::SessionContext;

/// The REST service, seen through the domain traits.
#[derive(Clone)]
pub struct SiteIndentApi {
    client: ApiClient,
}

impl SiteIndentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }
}

/// Percent-encodes an id for use as one path segment.
///
/// Ids made only of dots are refused: URL parsing would resolve them as
/// relative segments and the request would reach another endpoint.
pub(crate) fn path_segment(id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() || id.chars().all(|c| c == '.') {
        return Err(ApiError::new(400, format!("Invalid id '{}'", id)));
    }
    Ok(urlencoding::encode(id).into_owned())
}
