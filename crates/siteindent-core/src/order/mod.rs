//! Vendor orders placed against approved indents.

use crate::error::{ApiError, SiteIndentError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub material_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl OrderLineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub indent_id: String,
    pub vendor_name: String,
    pub vendor_contact: String,
    pub line_items: Vec<OrderLineItem>,
    pub total_value: f64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_delivery: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: u64,
    pub page: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// A priced line on a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub material_id: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Input for `POST /orders`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub indent_id: String,
    pub vendor_id: String,
    pub materials: Vec<OrderLine>,
}

impl NewOrder {
    /// An indent and a vendor are required, plus at least one line with a
    /// positive quantity and a non-negative unit price.
    pub fn validate(&self) -> crate::Result<()> {
        if self.indent_id.trim().is_empty() {
            return Err(SiteIndentError::validation("Please select an indent"));
        }
        if self.vendor_id.trim().is_empty() {
            return Err(SiteIndentError::validation("Please select a vendor"));
        }
        if self.materials.is_empty() {
            return Err(SiteIndentError::validation(
                "Please add at least one material",
            ));
        }
        for line in &self.materials {
            if !line.quantity.is_finite() || line.quantity <= 0.0 {
                return Err(SiteIndentError::validation(format!(
                    "Quantity for material '{}' must be positive",
                    line.material_id
                )));
            }
            if !line.unit_price.is_finite() || line.unit_price < 0.0 {
                return Err(SiteIndentError::validation(format!(
                    "Unit price for material '{}' cannot be negative",
                    line.material_id
                )));
            }
        }
        Ok(())
    }
}

/// The order endpoints of the remote service.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// `POST /orders`
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError>;

    /// `GET /orders`
    async fn list_orders(&self, filters: &OrderFilters) -> Result<OrderPage, ApiError>;

    /// `GET /orders/:id`
    async fn get_order(&self, id: &str) -> Result<Order, ApiError>;
}
