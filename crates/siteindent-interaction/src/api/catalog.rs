use super::SiteIndentApi;
use crate::mapping::{material_list_from, site_list_from};
use crate::transport::HttpRequest;
use async_trait::async_trait;
use siteindent_core::ApiError;
use siteindent_core::material::{Material, MaterialCatalog};
use siteindent_core::site::{Site, SiteDirectory};

#[async_trait]
impl MaterialCatalog for SiteIndentApi {
    async fn list_materials(&self) -> Result<Vec<Material>, ApiError> {
        let payload = self.client.call(HttpRequest::get("/materials")).await?;
        material_list_from(&payload)
    }

    async fn search_materials(&self, query: &str) -> Result<Vec<Material>, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::get("/materials/search").query("q", query))
            .await?;
        material_list_from(&payload)
    }
}

#[async_trait]
impl SiteDirectory for SiteIndentApi {
    async fn list_sites(&self) -> Result<Vec<Site>, ApiError> {
        let payload = self.client.call(HttpRequest::get("/sites")).await?;
        site_list_from(&payload)
    }
}
