use super::SiteIndentApi;
use crate::mapping::{login_grant_from, normalize_user};
use crate::transport::HttpRequest;
use async_trait::async_trait;
use serde_json::json;
use siteindent_core::ApiError;
use siteindent_core::auth::{AuthGateway, AuthGrant, LoginCredentials};
use siteindent_core::user::User;

#[async_trait]
impl AuthGateway for SiteIndentApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let payload = self
            .client
            .call(HttpRequest::post("/auth/login").json(body))
            .await?;
        login_grant_from(payload)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.client.call(HttpRequest::post("/auth/logout")).await?;
        Ok(())
    }

    async fn verify(&self, token: &str) -> Result<User, ApiError> {
        let payload = self
            .client
            .call_with_token(HttpRequest::get("/auth/verify"), token)
            .await?;
        // Some deployments wrap the user as `{ user: {...} }`
        match payload.get("user") {
            Some(user) if user.is_object() => normalize_user(user),
            _ => normalize_user(&payload),
        }
    }
}
