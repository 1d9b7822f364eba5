use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

use commands::{IndentAction, MaterialAction, OrderAction, ReportAction};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SITEINDENT_LOG";

#[derive(Parser)]
#[command(name = "siteindent")]
#[command(about = "SiteIndent CLI - construction material indents, approvals and orders", long_about = None)]
pub struct Cli {
    /// Directory holding config.toml and the session file
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Overrides the configured API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        email: String,
        #[arg(long, env = "SITEINDENT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Material requests
    Indents {
        #[command(subcommand)]
        action: IndentAction,
    },
    /// Material catalog
    Materials {
        #[command(subcommand)]
        action: MaterialAction,
    },
    /// List construction sites
    Sites,
    /// Vendor orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Dashboard, monthly reports and exports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Upload a receipt photo for an indent
    Upload {
        indent_id: String,
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let app = commands::bootstrap(cli.config_dir.as_deref(), cli.api_url.as_deref())?;
    app.sessions.restore_session().await;

    let is_login = matches!(cli.command, Commands::Login { .. });
    if let Err(err) = commands::run(&app, cli.command).await {
        let Some(notice) = commands::failure_notice(&app, is_login, &err).await else {
            return Err(err);
        };
        eprintln!("{}", notice);
        std::process::exit(1);
    }

    Ok(())
}
