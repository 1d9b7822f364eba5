//! User-facing notices.

use serde::Serialize;
use siteindent_core::error::GENERIC_ERROR_MESSAGE;
use siteindent_core::{ApiError, ApiErrorKind, SiteIndentError};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const SESSION_NOT_SAVED_MESSAGE: &str =
    "Logged in, but the session could not be saved. You will need to log in again next time.";
pub const NETWORK_NOTICE_MESSAGE: &str = "Network error. Check your connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message to show the user, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// The one conversion from an API failure to what the user sees.
    ///
    /// Validation messages are shown verbatim; service failures are not,
    /// since their text is meant for operators.
    pub fn from_api_error(err: &ApiError) -> Self {
        match err.kind() {
            ApiErrorKind::Authentication => {
                Self::new(NoticeLevel::Warning, SESSION_EXPIRED_MESSAGE)
            }
            ApiErrorKind::Validation => Self::error(err.message.clone()),
            ApiErrorKind::Service => Self::error(GENERIC_ERROR_MESSAGE),
            ApiErrorKind::Transport => Self::error(NETWORK_NOTICE_MESSAGE),
        }
    }

    /// Notice for a failed login.
    ///
    /// The backend answers wrong credentials with 401, so its reason is
    /// shown as is instead of the session-expired warning.
    pub fn from_login_error(err: &SiteIndentError) -> Self {
        match err.as_api_error() {
            Some(api) if api.is_authentication() => Self::error(api.message.clone()),
            _ => Self::from_error(err),
        }
    }

    pub fn from_error(err: &SiteIndentError) -> Self {
        match err {
            SiteIndentError::Api(api) => Self::from_api_error(api),
            SiteIndentError::Validation(message) => Self::error(message.clone()),
            SiteIndentError::NotAuthenticated => {
                Self::new(NoticeLevel::Warning, "Please log in to continue.")
            }
            SiteIndentError::PermissionDenied { .. } => {
                Self::error("You do not have permission to do that.")
            }
            SiteIndentError::Busy(_) => {
                Self::new(NoticeLevel::Info, "Already in progress, please wait.")
            }
            _ => Self::error(GENERIC_ERROR_MESSAGE),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
