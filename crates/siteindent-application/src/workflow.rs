//! Indent use cases: form setup, creation, approval, receipt.

use crate::gate::ActionGate;
use crate::session_manager::SessionManager;
use serde::Serialize;
use siteindent_core::auth::capability;
use siteindent_core::indent::{
    ApprovalDecision, Indent, IndentFilters, IndentPage, IndentService, IndentStatus, NewIndent,
    ReceiptConfirmation, ReceiptUpload, ReceiptUploader, UploadedReceipt,
};
use siteindent_core::material::{Material, MaterialCatalog};
use siteindent_core::site::{Site, SiteDirectory};
use siteindent_core::user::Role;
use siteindent_core::{Result, SiteIndentError};
use std::sync::Arc;

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Reference data for the create-indent form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndentForm {
    pub materials: Vec<Material>,
    pub sites: Vec<Site>,
    /// Preselected for site engineers: their assigned site.
    pub selected_site_id: Option<String>,
}

/// Content type for an upload, if it is an image.
pub fn image_content_type(file_name: &str) -> Option<String> {
    mime_guess::from_path(file_name)
        .first()
        .filter(|mime| mime.type_().as_str() == "image")
        .map(|mime| mime.essence_str().to_string())
}

/// Indent operations with permission checks and double-submit protection.
///
/// Every mutating call checks the capability first and holds a
/// single-flight key for its duration; a second trigger of the same action
/// while the first is in flight fails with `Busy` instead of sending.
pub struct IndentWorkflow {
    sessions: Arc<SessionManager>,
    indents: Arc<dyn IndentService>,
    uploader: Arc<dyn ReceiptUploader>,
    materials: Arc<dyn MaterialCatalog>,
    sites: Arc<dyn SiteDirectory>,
    gate: ActionGate,
}

impl IndentWorkflow {
    pub fn new(
        sessions: Arc<SessionManager>,
        indents: Arc<dyn IndentService>,
        uploader: Arc<dyn ReceiptUploader>,
        materials: Arc<dyn MaterialCatalog>,
        sites: Arc<dyn SiteDirectory>,
    ) -> Self {
        Self {
            sessions,
            indents,
            uploader,
            materials,
            sites,
            gate: ActionGate::new(),
        }
    }

    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    /// Loads materials and sites concurrently.
    pub async fn load_indent_form(&self) -> Result<IndentForm> {
        let session = self.sessions.require_permission(capability::CREATE_INDENTS)?;

        let (materials, sites) =
            tokio::join!(self.materials.list_materials(), self.sites.list_sites());
        let (materials, sites) = (materials?, sites?);

        let selected_site_id = match session.role {
            Role::SiteEngineer => session.assigned_site_id.clone(),
            _ => None,
        };

        Ok(IndentForm {
            materials,
            sites,
            selected_site_id,
        })
    }

    /// Lists indents; site engineers only ever see their assigned site.
    pub async fn list(&self, mut filters: IndentFilters) -> Result<IndentPage> {
        let session = self
            .sessions
            .current()
            .ok_or(SiteIndentError::NotAuthenticated)?;

        if session.role == Role::SiteEngineer {
            if let Some(site_id) = &session.assigned_site_id {
                filters.site_id = Some(site_id.clone());
            }
        }
        if filters.limit.is_none() {
            filters.limit = Some(DEFAULT_PAGE_SIZE);
        }
        if filters.page.is_none() {
            filters.page = Some(1);
        }

        Ok(self.indents.list_indents(&filters).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Indent> {
        self.sessions
            .current()
            .ok_or(SiteIndentError::NotAuthenticated)?;
        Ok(self.indents.get_indent(id).await?)
    }

    pub async fn create(&self, indent: NewIndent) -> Result<Indent> {
        self.sessions.require_permission(capability::CREATE_INDENTS)?;
        indent.validate()?;

        let _permit = self.gate.try_begin("create-indent")?;
        let created = self.indents.create_indent(&indent).await?;
        tracing::info!(
            "[IndentWorkflow] Created indent {} with {} item(s)",
            created.id,
            created.total_items
        );
        Ok(created)
    }

    pub async fn approve(&self, id: &str, notes: Option<String>) -> Result<Indent> {
        self.decide(id, ApprovalDecision::approve(notes)).await
    }

    pub async fn reject(&self, id: &str, notes: Option<String>) -> Result<Indent> {
        self.decide(id, ApprovalDecision::reject(notes)).await
    }

    async fn decide(&self, id: &str, decision: ApprovalDecision) -> Result<Indent> {
        self.sessions.require_permission(capability::APPROVE_INDENTS)?;

        // Approve and reject share a key: only one decision per indent at a time
        let _permit = self.gate.try_begin(format!("decide:{}", id))?;
        let indent = self.indents.approve_indent(id, &decision).await?;
        tracing::info!(
            "[IndentWorkflow] Indent {} {}",
            id,
            if decision.approved { "approved" } else { "rejected" }
        );
        Ok(indent)
    }

    pub async fn mark_received(
        &self,
        id: &str,
        confirmation: ReceiptConfirmation,
    ) -> Result<Indent> {
        self.sessions.require_permission(capability::MARK_RECEIVED)?;
        if !confirmation.quantity_received.is_finite() || confirmation.quantity_received < 0.0 {
            return Err(SiteIndentError::validation(
                "Received quantity cannot be negative",
            ));
        }
        if confirmation.is_damaged
            && confirmation
                .damage_description
                .as_deref()
                .is_none_or(|d| d.trim().is_empty())
        {
            return Err(SiteIndentError::validation(
                "Please describe the damage",
            ));
        }

        let _permit = self.gate.try_begin(format!("receive:{}", id))?;
        Ok(self.indents.mark_received(id, &confirmation).await?)
    }

    /// Explicit status transition, e.g. closing a received indent.
    pub async fn update_status(
        &self,
        id: &str,
        status: IndentStatus,
        notes: Option<&str>,
    ) -> Result<Indent> {
        self.sessions.require_permission(capability::APPROVE_INDENTS)?;
        let _permit = self.gate.try_begin(format!("status:{}", id))?;
        Ok(self.indents.update_status(id, status, notes).await?)
    }

    /// Uploads a receipt photo. Only image files are accepted.
    pub async fn upload_receipt(
        &self,
        indent_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedReceipt> {
        self.sessions.require_permission(capability::UPLOAD_RECEIPTS)?;

        let content_type = image_content_type(file_name)
            .ok_or_else(|| SiteIndentError::validation("Only image files are allowed"))?;
        if bytes.is_empty() {
            return Err(SiteIndentError::validation("The selected file is empty"));
        }

        let _permit = self.gate.try_begin(format!("upload:{}", indent_id))?;
        let upload = ReceiptUpload {
            indent_id: indent_id.to_string(),
            file_name: file_name.to_string(),
            content_type,
            bytes,
        };
        Ok(self.uploader.upload_receipt(&upload).await?)
    }
}
