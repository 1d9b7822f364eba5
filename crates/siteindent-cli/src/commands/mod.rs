//! Subcommand implementations.

mod auth;
mod catalog;
mod indents;
mod orders;
mod reports;

pub use indents::IndentAction;
pub use catalog::MaterialAction;
pub use orders::OrderAction;
pub use reports::ReportAction;

use crate::Commands;
use anyhow::{Context, Result};
use serde::Serialize;
use siteindent_application::{Notice, SiteIndentApp};
use siteindent_core::{ApiError, SiteIndentError};
use siteindent_infrastructure::{ConfigService, FileSessionStore};
use std::path::Path;
use std::sync::Arc;

/// Loads the configuration and wires the client over HTTP.
pub fn bootstrap(config_dir: Option<&Path>, api_url: Option<&str>) -> Result<SiteIndentApp> {
    let mut config = ConfigService::new(config_dir)?.load()?;
    if let Some(url) = api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    let store = match &config.storage_file {
        Some(path) => FileSessionStore::new(path.clone()),
        None => FileSessionStore::at_default_location(config_dir)?,
    };
    tracing::debug!("[cli] API {} session file {}", config.api_url, store.path().display());

    Ok(SiteIndentApp::from_config(config, Arc::new(store))?)
}

pub async fn run(app: &SiteIndentApp, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => auth::login(app, &email, &password).await,
        Commands::Logout => auth::logout(app).await,
        Commands::Whoami => auth::whoami(app),
        Commands::Indents { action } => indents::run(app, action).await,
        Commands::Materials { action } => catalog::materials(app, action).await,
        Commands::Sites => catalog::sites(app).await,
        Commands::Orders { action } => orders::run(app, action).await,
        Commands::Reports { action } => reports::run(app, action).await,
        Commands::Upload { indent_id, file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .context("Upload path has no file name")?;
            let receipt = app
                .indents
                .upload_receipt(&indent_id, &file_name, bytes)
                .await?;
            print_json(&receipt)
        }
    }
}

/// The notice for a failed command, or `None` if the error is not one the
/// user can act on.
///
/// A 401 from a login attempt means wrong credentials; it is reported as
/// the server worded it and never ends the current session. A 401 from any
/// other command means the credential was rejected, which logs out.
pub async fn failure_notice(
    app: &SiteIndentApp,
    during_login: bool,
    err: &anyhow::Error,
) -> Option<Notice> {
    let err = match err.downcast_ref::<SiteIndentError>() {
        Some(err) => err.clone(),
        None => SiteIndentError::from(err.downcast_ref::<ApiError>()?.clone()),
    };

    if during_login {
        return Some(Notice::from_login_error(&err));
    }
    Some(match err.as_api_error() {
        Some(api) => app.sessions.handle_api_error(api).await,
        None => Notice::from_error(&err),
    })
}

/// Prints a normalized value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
