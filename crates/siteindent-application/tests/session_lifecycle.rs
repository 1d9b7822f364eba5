//! Login, restart and logout against file-backed storage.

use serde_json::json;
use siteindent_application::SiteIndentApp;
use siteindent_core::config::ClientConfig;
use siteindent_core::session::{AuthState, SessionStore};
use siteindent_core::user::Role;
use siteindent_infrastructure::FileSessionStore;
use siteindent_interaction::{HttpMethod, ScriptedTransport};
use std::sync::Arc;
use tempfile::TempDir;

fn engineer_json() -> serde_json::Value {
    json!({
        "id": "u-7",
        "name": "Ravi",
        "email": "ravi@example.com",
        "role": "SITE_ENGINEER",
        "siteId": "site-chembur",
        "siteName": "Chembur Site"
    })
}

/// A fresh client over the session file in `dir`, as after a restart.
fn start(dir: &TempDir) -> (SiteIndentApp, Arc<ScriptedTransport>, FileSessionStore) {
    let transport = Arc::new(ScriptedTransport::new());
    let store = FileSessionStore::at_default_location(Some(dir.path())).unwrap();
    let app = SiteIndentApp::with_transport(
        ClientConfig::default(),
        Arc::new(store.clone()),
        transport.clone(),
    );
    (app, transport, store)
}

#[tokio::test]
async fn login_then_restore_in_fresh_process() {
    let dir = TempDir::new().unwrap();

    {
        let (app, transport, _) = start(&dir);
        transport.respond_json(
            200,
            json!({"success": true, "data": {"token": "tok-7", "user": engineer_json()}}),
        );
        app.sessions.login("ravi@example.com", "pw").await.unwrap();
    }

    let (app, transport, _) = start(&dir);
    transport.respond_json(200, json!({"success": true, "data": engineer_json()}));

    assert_eq!(app.sessions.restore_session().await, AuthState::Authenticated);
    let session = app.sessions.current().unwrap();
    assert_eq!(session.role, Role::SiteEngineer);
    assert_eq!(session.assigned_site_id.as_deref(), Some("site-chembur"));
    assert_eq!(session.assigned_site_name.as_deref(), Some("Chembur Site"));

    let verify = transport.last_request().unwrap();
    assert_eq!(verify.path, "/auth/verify");
    assert_eq!(verify.bearer.as_deref(), Some("tok-7"));
}

#[tokio::test]
async fn logout_clears_storage_even_if_backend_unreachable() {
    let dir = TempDir::new().unwrap();
    let (app, transport, store) = start(&dir);
    transport.respond_json(200, json!({"data": {"token": "tok-7", "user": engineer_json()}}));
    app.sessions.login("ravi@example.com", "pw").await.unwrap();

    // No scripted response: the logout call fails at the transport
    app.sessions.logout().await;

    let logout = transport.last_request().unwrap();
    assert_eq!((logout.method, logout.path.as_str()), (HttpMethod::Post, "/auth/logout"));
    assert!(store.load().await.unwrap().is_empty());
    assert!(!store.path().exists());

    let (restarted, transport, _) = start(&dir);
    assert_eq!(
        restarted.sessions.restore_session().await,
        AuthState::Unauthenticated
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn failed_verification_clears_storage() {
    let dir = TempDir::new().unwrap();
    let (_, _, store) = start(&dir);
    let user = siteindent_interaction::mapping::normalize_user(&engineer_json()).unwrap();
    store.save("revoked", &user).await.unwrap();

    let (app, transport, store) = start(&dir);
    transport.respond_json(401, json!({"message": "Token revoked"}));

    assert_eq!(app.sessions.restore_session().await, AuthState::Unauthenticated);
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn network_failure_during_restore_is_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let (_, _, store) = start(&dir);
    let user = siteindent_interaction::mapping::normalize_user(&engineer_json()).unwrap();
    store.save("tok-7", &user).await.unwrap();

    let (app, transport, store) = start(&dir);
    transport.fail("connection refused");

    assert_eq!(app.sessions.restore_session().await, AuthState::Unauthenticated);
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn navigator_follows_login_and_logout() {
    let dir = TempDir::new().unwrap();
    let (app, transport, _) = start(&dir);
    let mut navigator = app.navigator("/indents");
    assert_eq!(navigator.route(), "/login");

    transport.respond_json(200, json!({"data": {"token": "tok-7", "user": engineer_json()}}));
    app.sessions.login("ravi@example.com", "pw").await.unwrap();
    assert_eq!(navigator.session_changed().await.as_deref(), Some("/dashboard"));

    transport.respond_json(200, json!({"success": true}));
    app.sessions.logout().await;
    assert_eq!(navigator.session_changed().await.as_deref(), Some("/login"));
}
