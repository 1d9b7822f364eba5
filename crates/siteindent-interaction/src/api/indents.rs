use super::{SiteIndentApi, path_segment};
use crate::mapping::{
    approval_body, create_indent_body, indent_page_from, normalize_indent, receipt_body,
    status_body, upload_body, uploaded_receipt_from,
};
use crate::transport::HttpRequest;
use async_trait::async_trait;
use siteindent_core::ApiError;
use siteindent_core::indent::{
    ApprovalDecision, Indent, IndentFilters, IndentPage, IndentService, IndentStatus, NewIndent,
    ReceiptConfirmation, ReceiptUpload, ReceiptUploader, UploadedReceipt,
};

#[async_trait]
impl IndentService for SiteIndentApi {
    async fn create_indent(&self, indent: &NewIndent) -> Result<Indent, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::post("/indents").json(create_indent_body(indent)))
            .await?;
        normalize_indent(&payload)
    }

    async fn list_indents(&self, filters: &IndentFilters) -> Result<IndentPage, ApiError> {
        let request = HttpRequest::get("/indents")
            .query_opt("status", filters.status.map(|s| s.as_str()))
            .query_opt("siteId", filters.site_id.as_deref())
            .query_opt("page", filters.page)
            .query_opt("limit", filters.limit);
        let payload = self.client.call(request).await?;
        indent_page_from(&payload, filters.page)
    }

    async fn get_indent(&self, id: &str) -> Result<Indent, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::get(format!("/indents/{}", path_segment(id)?)))
            .await?;
        normalize_indent(&payload)
    }

    async fn approve_indent(
        &self,
        id: &str,
        decision: &ApprovalDecision,
    ) -> Result<Indent, ApiError> {
        let request = HttpRequest::patch(format!("/indents/{}/approve", path_segment(id)?))
            .json(approval_body(decision));
        let payload = self.client.call(request).await?;
        normalize_indent(&payload)
    }

    async fn mark_received(
        &self,
        id: &str,
        confirmation: &ReceiptConfirmation,
    ) -> Result<Indent, ApiError> {
        let request = HttpRequest::patch(format!("/indents/{}/receive", path_segment(id)?))
            .json(receipt_body(confirmation));
        let payload = self.client.call(request).await?;
        normalize_indent(&payload)
    }

    async fn update_status(
        &self,
        id: &str,
        status: IndentStatus,
        notes: Option<&str>,
    ) -> Result<Indent, ApiError> {
        let request = HttpRequest::patch(format!("/indents/{}/status", path_segment(id)?))
            .json(status_body(status, notes));
        let payload = self.client.call(request).await?;
        normalize_indent(&payload)
    }
}

#[async_trait]
impl ReceiptUploader for SiteIndentApi {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<UploadedReceipt, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::post("/upload").json(upload_body(upload)))
            .await?;
        uploaded_receipt_from(payload)
    }
}
