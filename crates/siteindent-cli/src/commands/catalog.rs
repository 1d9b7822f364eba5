use super::print_json;
use anyhow::Result;
use clap::Subcommand;
use siteindent_application::SearchOutcome;
use siteindent_core::material::MaterialCatalog;
use siteindent_core::site::SiteDirectory;
use siteindent_application::SiteIndentApp;

#[derive(Subcommand)]
pub enum MaterialAction {
    /// List every material
    List,
    /// Search materials by name
    Search { query: String },
}

pub async fn materials(app: &SiteIndentApp, action: MaterialAction) -> Result<()> {
    match action {
        MaterialAction::List => print_json(&app.api.list_materials().await?),
        MaterialAction::Search { query } => match app.search.search(&query).await? {
            SearchOutcome::Results(materials) => print_json(&materials),
            SearchOutcome::TooShort => {
                println!(
                    "Type at least {} characters to search",
                    app.config.min_search_chars
                );
                Ok(())
            }
            SearchOutcome::Superseded => Ok(()),
        },
    }
}

pub async fn sites(app: &SiteIndentApp) -> Result<()> {
    print_json(&app.api.list_sites().await?)
}
