use super::print_json;
use anyhow::Result;
use clap::Subcommand;
use siteindent_application::SiteIndentApp;
use siteindent_core::order::{NewOrder, OrderFilters, OrderLine, OrderStatus};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List vendor orders
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one order
    Show { id: String },
    /// Place a vendor order for an approved indent
    Create {
        #[arg(long)]
        indent: String,
        #[arg(long)]
        vendor: String,
        /// Line as `<material-id>:<quantity>:<unit-price>`, repeatable
        #[arg(long = "material", value_parser = parse_line, required = true)]
        materials: Vec<OrderLine>,
    },
}

fn parse_status(s: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(s).ok_or_else(|| format!("unknown order status '{}'", s))
}

fn parse_line(s: &str) -> Result<OrderLine, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(material_id)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected <material-id>:<quantity>:<unit-price>, got '{}'", s));
    };
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    let unit_price: f64 = price
        .trim()
        .parse()
        .map_err(|_| format!("invalid unit price in '{}'", s))?;
    Ok(OrderLine {
        material_id: material_id.trim().to_string(),
        quantity,
        unit_price,
    })
}

pub async fn run(app: &SiteIndentApp, action: OrderAction) -> Result<()> {
    match action {
        OrderAction::List {
            status,
            page,
            limit,
        } => {
            let filters = OrderFilters {
                status,
                page,
                limit,
            };
            print_json(&app.orders.list(filters).await?)
        }
        OrderAction::Show { id } => print_json(&app.orders.get(&id).await?),
        OrderAction::Create {
            indent,
            vendor,
            materials,
        } => {
            let order = NewOrder {
                indent_id: indent,
                vendor_id: vendor,
                materials,
            };
            print_json(&app.orders.create(order).await?)
        }
    }
}
