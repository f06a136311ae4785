//! SurrealDB implementation of [`OrderRepository`].
//!
//! The tracking mode is fixed per repository instance. In
//! [`OrderTracking::Status`] mode documents carry a `status` string; in
//! [`OrderTracking::CompletionToggle`] mode they carry a `completed` flag.
//! Operations belonging to the other mode are rejected.

use chrono::{DateTime, Utc};
use kiosk_core::error::{KioskError, KioskResult};
use kiosk_core::models::order::{
    DEFAULT_ORDER_STATUS, NewOrder, Order, OrderLine, OrderProgress, OrderTracking,
};
use kiosk_core::repository::OrderRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use super::{new_id, parse_id};
use crate::error::DbError;

const ENTITY: &str = "order";

#[derive(Debug, SurrealValue)]
struct OrderLineRow {
    id: String,
    name: Option<String>,
    price: i64,
    quantity: i64,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        OrderLine {
            id: row.id,
            name: row.name.unwrap_or_default(),
            price: row.price,
            quantity: row.quantity,
        }
    }
}

impl From<OrderLine> for OrderLineRow {
    fn from(line: OrderLine) -> Self {
        OrderLineRow {
            id: line.id,
            name: Some(line.name),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// DB-side row struct for queries where the record key is already known.
#[derive(Debug, SurrealValue)]
struct OrderRow {
    user_id: String,
    products: Option<Vec<OrderLineRow>>,
    status: Option<String>,
    completed: Option<bool>,
    created_at: DateTime<Utc>,
    total_price: i64,
}

/// DB-side row struct that includes the record key via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    user_id: String,
    products: Option<Vec<OrderLineRow>>,
    status: Option<String>,
    completed: Option<bool>,
    created_at: DateTime<Utc>,
    total_price: i64,
}

fn progress_for(
    tracking: OrderTracking,
    id: &str,
    status: Option<String>,
    completed: Option<bool>,
) -> Result<OrderProgress, DbError> {
    match tracking {
        OrderTracking::Status => status
            .map(|status| OrderProgress::Status { status })
            .ok_or_else(|| DbError::decode(ENTITY, format!("order {id} has no status"))),
        OrderTracking::CompletionToggle => Ok(OrderProgress::Toggle {
            completed: completed.unwrap_or(false),
        }),
    }
}

impl OrderRow {
    fn into_order(self, id: String, tracking: OrderTracking) -> Result<Order, DbError> {
        let progress = progress_for(tracking, &id, self.status, self.completed)?;
        Ok(Order {
            id,
            user_id: self.user_id,
            products: lines_from_rows(self.products),
            progress,
            created_at: self.created_at,
            total_price: self.total_price,
        })
    }
}

impl OrderRowWithId {
    fn try_into_order(self, tracking: OrderTracking) -> Result<Order, DbError> {
        let progress = progress_for(tracking, &self.record_id, self.status, self.completed)?;
        Ok(Order {
            id: self.record_id,
            user_id: self.user_id,
            products: lines_from_rows(self.products),
            progress,
            created_at: self.created_at,
            total_price: self.total_price,
        })
    }
}

fn lines_from_rows(rows: Option<Vec<OrderLineRow>>) -> Vec<OrderLine> {
    rows.unwrap_or_default().into_iter().map(Into::into).collect()
}

/// SurrealDB implementation of the standalone Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
    tracking: OrderTracking,
}

impl<C: Connection> SurrealOrderRepository<C> {
    /// Repository tracking orders by status string.
    pub fn new(db: Surreal<C>) -> Self {
        Self::with_tracking(db, OrderTracking::Status)
    }

    pub fn with_tracking(db: Surreal<C>, tracking: OrderTracking) -> Self {
        Self { db, tracking }
    }

    pub fn tracking(&self) -> OrderTracking {
        self.tracking
    }

    fn require_mode(&self, mode: OrderTracking, operation: &str) -> KioskResult<()> {
        if self.tracking == mode {
            Ok(())
        } else {
            Err(KioskError::invalid_argument(format!(
                "{operation} is not available with {:?} order tracking",
                self.tracking
            )))
        }
    }

    fn rows_into_orders(&self, rows: Vec<OrderRowWithId>) -> Result<Vec<Order>, DbError> {
        rows.into_iter()
            .map(|row| row.try_into_order(self.tracking))
            .collect()
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create(&self, input: NewOrder) -> KioskResult<String> {
        if input.user_id.trim().is_empty() {
            return Err(KioskError::invalid_argument("order userId is required"));
        }

        let id = new_id();
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        let products: Vec<OrderLineRow> = input.products.into_iter().map(Into::into).collect();

        debug!(order_id = %id, user_id = %input.user_id, "Creating order");

        let builder = match self.tracking {
            OrderTracking::Status => {
                let status = input
                    .status
                    .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string());
                self.db
                    .query(
                        "CREATE type::record('orders', $id) SET \
                         user_id = $user_id, \
                         products = $products, \
                         status = $status, \
                         created_at = $created_at, \
                         total_price = $total_price \
                         RETURN NONE",
                    )
                    .bind(("status", status))
            }
            OrderTracking::CompletionToggle => {
                if input.status.is_some() {
                    return Err(KioskError::invalid_argument(
                        "status is not tracked in completion-toggle mode",
                    ));
                }
                self.db.query(
                    "CREATE type::record('orders', $id) SET \
                     user_id = $user_id, \
                     products = $products, \
                     completed = false, \
                     created_at = $created_at, \
                     total_price = $total_price \
                     RETURN NONE",
                )
            }
        };

        builder
            .bind(("id", id.clone()))
            .bind(("user_id", input.user_id))
            .bind(("products", products))
            .bind(("created_at", created_at))
            .bind(("total_price", input.total_price))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> KioskResult<Order> {
        let id = parse_id(ENTITY, id)?;

        let mut result = self
            .db
            .query("SELECT * FROM type::record('orders', $id)")
            .bind(("id", id.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found(ENTITY, id.clone()))?;

        Ok(row.into_order(id, self.tracking)?)
    }

    async fn get_by_user_id(&self, user_id: &str) -> KioskResult<Vec<Order>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM orders \
                 WHERE user_id = $user_id \
                 ORDER BY created_at DESC",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(self.rows_into_orders(rows)?)
    }

    async fn list(&self) -> KioskResult<Vec<Order>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM orders ORDER BY created_at DESC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(self.rows_into_orders(rows)?)
    }

    async fn update_status(&self, id: &str, status: &str) -> KioskResult<()> {
        self.require_mode(OrderTracking::Status, "update_status")?;
        let id = parse_id(ENTITY, id)?;

        debug!(order_id = %id, status, "Updating order status");

        let mut result = self
            .db
            .query("UPDATE type::record('orders', $id) SET status = $status")
            .bind(("id", id.clone()))
            .bind(("status", status.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::not_found(ENTITY, id).into());
        }
        Ok(())
    }

    async fn cancel(&self, id: &str) -> KioskResult<()> {
        let id = parse_id(ENTITY, id)?;

        debug!(order_id = %id, "Cancelling order");

        let mut result = self
            .db
            .query("DELETE type::record('orders', $id) RETURN BEFORE")
            .bind(("id", id.clone()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::not_found(ENTITY, id).into());
        }
        Ok(())
    }

    async fn toggle_completed(&self, id: &str) -> KioskResult<Order> {
        self.require_mode(OrderTracking::CompletionToggle, "toggle_completed")?;
        let id = parse_id(ENTITY, id)?;

        debug!(order_id = %id, "Toggling order completion");

        let mut result = self
            .db
            .query(
                "UPDATE type::record('orders', $id) \
                 SET completed = !(completed ?? false) \
                 RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found(ENTITY, id.clone()))?;

        Ok(row.into_order(id, self.tracking)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mode_requires_status_field() {
        let err = progress_for(OrderTracking::Status, "o1", None, Some(true)).unwrap_err();
        assert!(matches!(err, DbError::Decode { .. }));

        let progress =
            progress_for(OrderTracking::Status, "o1", Some("shipped".into()), None).unwrap();
        assert_eq!(progress.status(), Some("shipped"));
    }

    #[test]
    fn toggle_mode_defaults_to_incomplete() {
        let progress = progress_for(OrderTracking::CompletionToggle, "o1", None, None).unwrap();
        assert_eq!(progress.completed(), Some(false));
    }

    #[test]
    fn line_rows_keep_prices_as_given() {
        let row = OrderLineRow {
            id: "p1".into(),
            name: None,
            price: 10,
            quantity: 2,
        };
        let line: OrderLine = row.into();
        assert_eq!(line.name, "");
        assert_eq!(line.subtotal(), 20);
    }
}
