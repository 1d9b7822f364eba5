use super::{SiteIndentApi, path_segment};
use crate::mapping::{create_order_body, normalize_order, order_page_from};
use crate::transport::HttpRequest;
use async_trait::async_trait;
use siteindent_core::ApiError;
use siteindent_core::order::{NewOrder, Order, OrderFilters, OrderPage, OrderService};

#[async_trait]
impl OrderService for SiteIndentApi {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::post("/orders").json(create_order_body(order)))
            .await?;
        normalize_order(&payload)
    }

    async fn list_orders(&self, filters: &OrderFilters) -> Result<OrderPage, ApiError> {
        let request = HttpRequest::get("/orders")
            .query_opt("status", filters.status.map(|s| s.as_str()))
            .query_opt("page", filters.page)
            .query_opt("limit", filters.limit);
        let payload = self.client.call(request).await?;
        order_page_from(&payload, filters.page)
    }

    async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::get(format!("/orders/{}", path_segment(id)?)))
            .await?;
        normalize_order(&payload)
    }
}
