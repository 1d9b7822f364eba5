use super::print_json;
use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Subcommand;
use siteindent_application::SiteIndentApp;
use siteindent_core::SiteIndentError;
use siteindent_core::auth::capability;
use siteindent_core::report::{ExportFilters, ReportKind, ReportService};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Dashboard totals and charts
    Dashboard {
        #[arg(long)]
        site: Option<String>,
    },
    /// Monthly summary, defaults to the current month
    Monthly {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Download a report file
    Export {
        #[arg(value_parser = parse_kind)]
        kind: ReportKind,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        site: Option<String>,
        /// Directory to write into, defaults to the working directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_kind(s: &str) -> Result<ReportKind, String> {
    ReportKind::parse(s).ok_or_else(|| format!("unknown report type '{}'", s))
}

pub async fn run(app: &SiteIndentApp, action: ReportAction) -> Result<()> {
    match action {
        // Every role sees a dashboard; site engineers get their own site.
        ReportAction::Dashboard { site } => {
            let session = app
                .sessions
                .current()
                .ok_or(SiteIndentError::NotAuthenticated)?;
            let site = if app.sessions.has_permission(capability::VIEW_ALL_SITES) {
                site
            } else {
                session.assigned_site_id.clone()
            };
            let stats = app
                .api
                .dashboard(site.as_deref())
                .await
                .map_err(SiteIndentError::from)?;
            print_json(&stats)
        }
        ReportAction::Monthly { month, year } => {
            app.sessions.require_permission(capability::VIEW_REPORTS)?;
            let today = chrono::Local::now().date_naive();
            let month = month.unwrap_or_else(|| today.month());
            let year = year.unwrap_or_else(|| today.year());
            if !(1..=12).contains(&month) {
                return Err(SiteIndentError::validation("Month must be between 1 and 12").into());
            }
            let report = app
                .api
                .monthly_report(month, year)
                .await
                .map_err(SiteIndentError::from)?;
            print_json(&report)
        }
        ReportAction::Export {
            kind,
            month,
            year,
            site,
            output,
        } => {
            app.sessions.require_permission(capability::VIEW_REPORTS)?;
            let filters = ExportFilters {
                month,
                year,
                site_id: site,
            };
            let report = app
                .api
                .export_report(kind, &filters)
                .await
                .map_err(SiteIndentError::from)?;

            let path = output.unwrap_or_default().join(&report.file_name);
            std::fs::write(&path, &report.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {} ({} bytes)", path.display(), report.bytes.len());
            Ok(())
        }
    }
}
