//! Vendor order use cases.

use crate::gate::ActionGate;
use crate::session_manager::SessionManager;
use crate::workflow::DEFAULT_PAGE_SIZE;
use siteindent_core::Result;
use siteindent_core::auth::capability;
use siteindent_core::order::{NewOrder, Order, OrderFilters, OrderPage, OrderService};
use std::sync::Arc;

/// Orders are placed and viewed by the roles holding `create_orders`.
///
/// Placing an order holds the single-flight key `create-order:<indent id>`,
/// so a repeated trigger for the same indent is refused while the first
/// request is in flight.
pub struct OrderWorkflow {
    sessions: Arc<SessionManager>,
    orders: Arc<dyn OrderService>,
    gate: ActionGate,
}

impl OrderWorkflow {
    pub fn new(sessions: Arc<SessionManager>, orders: Arc<dyn OrderService>) -> Self {
        Self {
            sessions,
            orders,
            gate: ActionGate::new(),
        }
    }

    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    pub async fn create(&self, order: NewOrder) -> Result<Order> {
        self.sessions.require_permission(capability::CREATE_ORDERS)?;
        order.validate()?;

        let _permit = self
            .gate
            .try_begin(format!("create-order:{}", order.indent_id.trim()))?;
        let created = self.orders.create_order(&order).await?;
        tracing::info!(
            "[OrderWorkflow] Order {} placed for indent {} ({} line(s))",
            created.id,
            created.indent_id,
            created.line_items.len()
        );
        Ok(created)
    }

    pub async fn list(&self, mut filters: OrderFilters) -> Result<OrderPage> {
        self.sessions.require_permission(capability::CREATE_ORDERS)?;
        if filters.limit.is_none() {
            filters.limit = Some(DEFAULT_PAGE_SIZE);
        }
        if filters.page.is_none() {
            filters.page = Some(1);
        }
        Ok(self.orders.list_orders(&filters).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Order> {
        self.sessions.require_permission(capability::CREATE_ORDERS)?;
        Ok(self.orders.get_order(id).await?)
    }
}
