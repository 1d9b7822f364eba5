//! Indent domain module.
//!
//! - `model`: indents, their status lifecycle and the request payloads
//! - `service`: the indent endpoints of the remote service

mod model;
mod service;

pub use model::{
    ApprovalDecision, Indent, IndentFilters, IndentLine, IndentPage, IndentStatus, NewIndent,
    ReceiptConfirmation, ReceiptUpload, RequestedMaterial, UploadedReceipt,
};
pub use service::{IndentService, ReceiptUploader};
