use super::print_json;
use anyhow::Result;
use siteindent_application::SiteIndentApp;
use siteindent_core::SiteIndentError;
use siteindent_core::auth::visible_nav_items;

pub async fn login(app: &SiteIndentApp, email: &str, password: &str) -> Result<()> {
    let signed_in = app.sessions.login(email, password).await?;
    println!(
        "Logged in as {} ({})",
        signed_in.session.display_name,
        signed_in.session.role.display_name()
    );
    if let Some(warning) = signed_in.warning {
        eprintln!("{}", warning);
    }
    Ok(())
}

pub async fn logout(app: &SiteIndentApp) -> Result<()> {
    app.sessions.logout().await;
    println!("Logged out");
    Ok(())
}

pub fn whoami(app: &SiteIndentApp) -> Result<()> {
    let session = app
        .sessions
        .current()
        .ok_or(SiteIndentError::NotAuthenticated)?;

    let pages: Vec<&str> = visible_nav_items(Some(&session))
        .into_iter()
        .map(|item| item.label)
        .collect();

    print_json(&serde_json::json!({
        "user": session.user(),
        "role": session.role.display_name(),
        "pages": pages,
    }))
}
