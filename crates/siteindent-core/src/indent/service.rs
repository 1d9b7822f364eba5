//! Indent service traits.

use super::model::{
    ApprovalDecision, Indent, IndentFilters, IndentPage, IndentStatus, NewIndent,
    ReceiptConfirmation, ReceiptUpload, UploadedReceipt,
};
use crate::error::ApiError;
use async_trait::async_trait;

/// The indent endpoints of the remote service.
///
/// `list_indents` and `get_indent` are safe to re-issue. The mutating calls
/// are not guaranteed idempotent by the backend and must be triggered once
/// per user action.
#[async_trait]
pub trait IndentService: Send + Sync {
    /// `POST /indents`
    async fn create_indent(&self, indent: &NewIndent) -> Result<Indent, ApiError>;

    /// `GET /indents`
    async fn list_indents(&self, filters: &IndentFilters) -> Result<IndentPage, ApiError>;

    /// `GET /indents/:id`
    async fn get_indent(&self, id: &str) -> Result<Indent, ApiError>;

    /// `PATCH /indents/:id/approve`, used for both approval and rejection.
    async fn approve_indent(
        &self,
        id: &str,
        decision: &ApprovalDecision,
    ) -> Result<Indent, ApiError>;

    /// `PATCH /indents/:id/receive`
    async fn mark_received(
        &self,
        id: &str,
        confirmation: &ReceiptConfirmation,
    ) -> Result<Indent, ApiError>;

    /// `PATCH /indents/:id/status`
    async fn update_status(
        &self,
        id: &str,
        status: IndentStatus,
        notes: Option<&str>,
    ) -> Result<Indent, ApiError>;
}

/// `POST /upload`
#[async_trait]
pub trait ReceiptUploader: Send + Sync {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<UploadedReceipt, ApiError>;
}
