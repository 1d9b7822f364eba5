//! Error types for the SiteIndent client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status carried by an [`ApiError`] when no HTTP response was received at all.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Status carried by an [`ApiError`] when a success response could not be
/// reshaped into the expected domain type.
pub const MALFORMED_RESPONSE_STATUS: u16 = 502;

/// Message used when the server rejects a request without explaining why.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Message used for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Classification of an [`ApiError`], derived from its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// 401: the credential is missing, expired or revoked.
    Authentication,
    /// Any other 4xx: the request was understood and refused.
    Validation,
    /// 5xx, or a response the client could not interpret.
    Service,
    /// The request never produced a response.
    Transport,
}

/// The single typed failure produced by the API adaptation layer.
///
/// Callers never see raw HTTP or transport errors; everything is funneled
/// into this struct, which carries enough to tell authentication failures
/// from validation failures from service or network failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Builds the error for a non-success HTTP status, falling back to the
    /// generic message when the server did not provide one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::new(status, message)
    }

    /// Error for a request that never got a response.
    pub fn network() -> Self {
        Self::new(NETWORK_ERROR_STATUS, NETWORK_ERROR_MESSAGE)
    }

    /// Error for a success response whose payload did not have the expected shape.
    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        Self::new(
            MALFORMED_RESPONSE_STATUS,
            format!("Unexpected response from server: {}", detail),
        )
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            NETWORK_ERROR_STATUS => ApiErrorKind::Transport,
            401 => ApiErrorKind::Authentication,
            400..=499 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Service,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == ApiErrorKind::Authentication
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ApiErrorKind::Transport
    }
}

/// A shared error type for the SiteIndent client.
///
/// Typed, structured variants with automatic conversion from the common
/// error types via `From`.
#[derive(Error, Debug, Clone, Serialize)]
pub enum SiteIndentError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote API failure
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Security error (credentials, tokens)
    #[error("Security error: {0}")]
    Security(String),

    /// No authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The current role lacks the capability
    #[error("Permission denied: '{capability}' is not granted")]
    PermissionDenied { capability: String },

    /// The same action is already in flight
    #[error("Action already in progress: {0}")]
    Busy(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteIndentError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    pub fn permission_denied(capability: impl Into<String>) -> Self {
        Self::PermissionDenied {
            capability: capability.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    /// Returns the wrapped API error, if this error came from the remote service.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SiteIndentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SiteIndentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SiteIndentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SiteIndentError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used at the binary edge
impl From<anyhow::Error> for SiteIndentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SiteIndentError>`.
pub type Result<T> = std::result::Result<T, SiteIndentError>;
