//! Indent domain models.

use crate::error::{Result, SiteIndentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::EnumIter;

/// Lifecycle of an indent.
///
/// Indents are never deleted, only transitioned: purchase staff approve or
/// reject, orders move them to `Ordered`, site engineers mark them
/// `Received` (or `Partial`), and they end `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndentStatus {
    Pending,
    Approved,
    Rejected,
    Ordered,
    Received,
    Partial,
    Closed,
}

impl IndentStatus {
    /// Case-insensitive parse of the backend status name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "ORDERED" => Some(Self::Ordered),
            "RECEIVED" => Some(Self::Received),
            "PARTIAL" => Some(Self::Partial),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Ordered => "ORDERED",
            Self::Received => "RECEIVED",
            Self::Partial => "PARTIAL",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether an approver can still act on the indent.
    pub fn awaits_approval(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for IndentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of an indent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedMaterial {
    pub material_id: String,
    pub name: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<serde_json::Value>,
}

/// A site's request for materials, in the shape every caller receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indent {
    pub id: String,
    pub site_id: String,
    pub site_name: String,
    pub requested_materials: Vec<RequestedMaterial>,
    pub status: IndentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Number of material lines requested.
    pub total_items: usize,
}

impl Indent {
    pub fn total_quantity(&self) -> f64 {
        self.requested_materials.iter().map(|m| m.quantity).sum()
    }
}

/// A page of indents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndentPage {
    pub indents: Vec<Indent>,
    pub total: u64,
    pub page: u32,
}

impl IndentPage {
    /// A full page suggests more are available.
    pub fn has_more(&self, limit: u32) -> bool {
        limit > 0 && self.indents.len() as u32 >= limit
    }
}

/// Filters for `GET /indents`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentFilters {
    pub status: Option<IndentStatus>,
    pub site_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl IndentFilters {
    pub fn with_status(mut self, status: IndentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_site(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// A material line on a new indent.
#[derive(Debug, Clone, PartialEq)]
pub struct IndentLine {
    pub material_id: String,
    pub quantity: f64,
    pub specifications: Option<serde_json::Value>,
}

impl IndentLine {
    pub fn new(material_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            material_id: material_id.into(),
            quantity,
            specifications: None,
        }
    }
}

/// Input for creating an indent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIndent {
    pub site_id: String,
    pub description: Option<String>,
    pub materials: Vec<IndentLine>,
}

impl NewIndent {
    /// Checks the indent before anything is sent.
    ///
    /// A site must be selected, at least one material added, every quantity
    /// at least 1, and no material listed twice.
    pub fn validate(&self) -> Result<()> {
        if self.site_id.trim().is_empty() {
            return Err(SiteIndentError::validation("Please select a site"));
        }
        if self.materials.is_empty() {
            return Err(SiteIndentError::validation(
                "Please add at least one material",
            ));
        }

        let mut seen = HashSet::new();
        for line in &self.materials {
            if !line.quantity.is_finite() || line.quantity < 1.0 {
                return Err(SiteIndentError::validation(format!(
                    "Quantity for material '{}' must be at least 1",
                    line.material_id
                )));
            }
            if !seen.insert(line.material_id.as_str()) {
                return Err(SiteIndentError::validation(format!(
                    "Material '{}' already added",
                    line.material_id
                )));
            }
        }
        Ok(())
    }
}

/// Approve or reject a pending indent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalDecision {
    pub approved: bool,
    pub notes: Option<String>,
}

impl ApprovalDecision {
    pub fn approve(notes: Option<String>) -> Self {
        Self {
            approved: true,
            notes,
        }
    }

    pub fn reject(notes: Option<String>) -> Self {
        Self {
            approved: false,
            notes,
        }
    }
}

/// A site engineer's confirmation that material arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptConfirmation {
    pub material_id: String,
    pub quantity_received: f64,
    pub is_damaged: bool,
    pub damage_description: Option<String>,
}

/// A receipt photo to attach to an indent.
#[derive(Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub indent_id: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ReceiptUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptUpload")
            .field("indent_id", &self.indent_id)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Where an uploaded receipt can be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedReceipt {
    pub url: String,
}
