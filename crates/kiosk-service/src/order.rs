//! Standalone order service.

use chrono::Utc;
use kiosk_core::error::KioskResult;
use kiosk_core::models::order::{NewOrder, Order, OrderLine, OrderStatus};
use kiosk_core::repository::OrderRepository;
use tracing::{debug, info};

use crate::config::OrderServiceConfig;
use crate::error::{ServiceError, require};

/// Input for creating a standalone order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub user_id: String,
    pub products: Vec<OrderLine>,
    /// Derived from the lines when `None`.
    pub total_price: Option<i64>,
    pub status: Option<String>,
}

/// Sum of `price * quantity` over all lines, saturating on overflow.
pub fn order_total(lines: &[OrderLine]) -> i64 {
    lines
        .iter()
        .fold(0i64, |acc, line| acc.saturating_add(line.subtotal()))
}

fn parse_status(status: &str) -> Result<OrderStatus, ServiceError> {
    status
        .parse()
        .map_err(|_| ServiceError::UnknownStatus(status.to_string()))
}

pub struct OrderService<O: OrderRepository> {
    repo: O,
    config: OrderServiceConfig,
}

impl<O: OrderRepository> OrderService<O> {
    pub fn new(repo: O, config: OrderServiceConfig) -> Self {
        Self { repo, config }
    }

    pub async fn create(&self, input: CreateOrderInput) -> KioskResult<String> {
        require("userId", &input.user_id)?;

        if self.config.strict_transitions
            && let Some(status) = input.status.as_deref()
            && parse_status(status)? != OrderStatus::Created
        {
            return Err(ServiceError::IllegalTransition {
                from: "new".into(),
                to: status.to_string(),
            }
            .into());
        }

        let total_price = input
            .total_price
            .unwrap_or_else(|| order_total(&input.products));

        let id = self
            .repo
            .create(NewOrder {
                user_id: input.user_id,
                products: input.products,
                total_price,
                status: input.status,
                created_at: Some(Utc::now()),
            })
            .await?;

        info!(order_id = %id, total_price, "Created order");
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> KioskResult<Order> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_user_orders(&self, user_id: &str) -> KioskResult<Vec<Order>> {
        self.repo.get_by_user_id(user_id).await
    }

    pub async fn list(&self) -> KioskResult<Vec<Order>> {
        self.repo.list().await
    }

    /// Overwrite the order status.
    ///
    /// With strict transitions the current status is read first and the
    /// move is checked against [`OrderStatus::can_transition_to`]. The
    /// check and the write are separate statements.
    pub async fn update_status(&self, id: &str, status: &str) -> KioskResult<()> {
        require("status", status)?;

        if self.config.strict_transitions {
            let next = parse_status(status)?;
            let order = self.repo.get_by_id(id).await?;
            if let Some(current) = order.progress.status() {
                let current_status = parse_status(current)?;
                if !current_status.can_transition_to(next) {
                    return Err(ServiceError::IllegalTransition {
                        from: current.to_string(),
                        to: status.to_string(),
                    }
                    .into());
                }
            }
        }

        debug!(order_id = %id, status, "Updating status");
        self.repo.update_status(id, status).await
    }

    pub async fn cancel(&self, id: &str) -> KioskResult<()> {
        self.repo.cancel(id).await?;
        info!(order_id = %id, "Cancelled order");
        Ok(())
    }

    pub async fn toggle_completed(&self, id: &str) -> KioskResult<Order> {
        self.repo.toggle_completed(id).await
    }
}
