use super::print_json;
use anyhow::Result;
use clap::Subcommand;
use siteindent_application::SiteIndentApp;
use siteindent_core::indent::{IndentFilters, IndentLine, IndentStatus, NewIndent, ReceiptConfirmation};

#[derive(Subcommand)]
pub enum IndentAction {
    /// List indents, newest first
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<IndentStatus>,
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one indent
    Show { id: String },
    /// Raise a new indent
    Create {
        #[arg(long)]
        site: String,
        /// Material and quantity as `<material-id>:<quantity>`, repeatable
        #[arg(long = "material", value_parser = parse_line, required = true)]
        materials: Vec<IndentLine>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Approve a pending indent
    Approve {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Reject a pending indent
    Reject {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Confirm delivered quantity for one material
    Receive {
        id: String,
        #[arg(long)]
        material: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        damaged: bool,
        #[arg(long)]
        damage_description: Option<String>,
    },
    /// Move an indent to another status, e.g. CLOSED
    Status {
        id: String,
        #[arg(value_parser = parse_status)]
        status: IndentStatus,
        #[arg(long)]
        notes: Option<String>,
    },
}

fn parse_status(s: &str) -> Result<IndentStatus, String> {
    IndentStatus::parse(s).ok_or_else(|| format!("unknown indent status '{}'", s))
}

fn parse_line(s: &str) -> Result<IndentLine, String> {
    let (material_id, quantity) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected <material-id>:<quantity>, got '{}'", s))?;
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok(IndentLine::new(material_id.trim(), quantity))
}

pub async fn run(app: &SiteIndentApp, action: IndentAction) -> Result<()> {
    let workflow = &app.indents;
    match action {
        IndentAction::List {
            status,
            site,
            page,
            limit,
        } => {
            let filters = IndentFilters {
                status,
                site_id: site,
                page,
                limit,
            };
            print_json(&workflow.list(filters).await?)
        }
        IndentAction::Show { id } => print_json(&workflow.get(&id).await?),
        IndentAction::Create {
            site,
            materials,
            description,
        } => {
            let indent = NewIndent {
                site_id: site,
                description,
                materials,
            };
            print_json(&workflow.create(indent).await?)
        }
        IndentAction::Approve { id, notes } => print_json(&workflow.approve(&id, notes).await?),
        IndentAction::Reject { id, notes } => print_json(&workflow.reject(&id, notes).await?),
        IndentAction::Receive {
            id,
            material,
            quantity,
            damaged,
            damage_description,
        } => {
            let confirmation = ReceiptConfirmation {
                material_id: material,
                quantity_received: quantity,
                is_damaged: damaged,
                damage_description,
            };
            print_json(&workflow.mark_received(&id, confirmation).await?)
        }
        IndentAction::Status { id, status, notes } => {
            print_json(&workflow.update_status(&id, status, notes.as_deref()).await?)
        }
    }
}
