//! Material reference data.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A material that can be requested on an indent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
}

/// Read-only access to the material catalog.
#[async_trait]
pub trait MaterialCatalog: Send + Sync {
    /// `GET /materials`
    async fn list_materials(&self) -> Result<Vec<Material>, ApiError>;

    /// `GET /materials/search?q=`
    async fn search_materials(&self, query: &str) -> Result<Vec<Material>, ApiError>;
}
