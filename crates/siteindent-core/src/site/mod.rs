//! Construction sites.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[async_trait]
pub trait SiteDirectory: Send + Sync {
    /// `GET /sites`
    async fn list_sites(&self) -> Result<Vec<Site>, ApiError>;
}
