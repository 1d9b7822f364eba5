//! The single point of contact with the REST service.

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use serde_json::Value;
use siteindent_core::config::ClientConfig;
use siteindent_core::session::SessionContext;
use siteindent_core::{ApiError, SiteIndentError};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Issues requests on behalf of the current session.
///
/// The bearer token is read from the injected [`SessionContext`] at send
/// time, so a login or logout takes effect on the next request. Every
/// failure leaves this type as an [`ApiError`]:
///
/// - no response: [`ApiError::network`]
/// - non-success status: the body's `message` (or `error`), else the generic message
/// - undecodable success body: [`ApiError::malformed`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    /// Client over HTTP using the configured base URL and timeout.
    pub fn from_config(
        config: &ClientConfig,
        session: SessionContext,
    ) -> Result<Self, SiteIndentError> {
        let transport = ReqwestTransport::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| SiteIndentError::config(e.to_string()))?;
        Ok(Self::new(Arc::new(transport), session))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends with the session's token and returns the unwrapped payload.
    pub async fn call(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let request = request.bearer(self.session.token());
        let response = self.dispatch(request).await?;
        unwrap_envelope(&response.body)
    }

    /// Sends with an explicit token instead of the session's.
    pub async fn call_with_token(
        &self,
        request: HttpRequest,
        token: &str,
    ) -> Result<Value, ApiError> {
        let response = self.dispatch(request.bearer(Some(token.to_string()))).await?;
        unwrap_envelope(&response.body)
    }

    /// Sends with the session's token and returns the raw body bytes.
    pub async fn call_raw(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        let request = request.bearer(self.session.token());
        Ok(self.dispatch(request).await?.body)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request_id = Uuid::new_v4();
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!("[ApiClient] {} {} {}", request_id, method, path);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[ApiClient] {} {} {} failed: {}", request_id, method, path, e);
                return Err(ApiError::network());
            }
        };

        if !response.is_success() {
            let err = error_from_response(response.status, &response.body);
            tracing::warn!(
                "[ApiClient] {} {} {} -> {} ({})",
                request_id,
                method,
                path,
                err.status,
                err.message
            );
            return Err(err);
        }

        tracing::debug!(
            "[ApiClient] {} {} {} -> {}",
            request_id,
            method,
            path,
            response.status
        );
        Ok(response)
    }
}

/// Builds the error for a non-success response.
///
/// The server's `message` field is preferred, then `error`; an empty or
/// non-JSON body yields the generic message.
pub fn error_from_response(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body).ok().and_then(|json| {
        ["message", "error"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
    });
    ApiError::from_status(status, message)
}

/// Extracts the payload of a success response.
///
/// Bodies shaped `{success, data?, message?, error?}` yield `data`; any
/// other JSON body is the payload itself. An empty body is `null`.
pub fn unwrap_envelope(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let json: Value = serde_json::from_slice(body).map_err(ApiError::malformed)?;
    match json {
        Value::Object(mut map) if map.contains_key("success") || map.contains_key("data") => {
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
