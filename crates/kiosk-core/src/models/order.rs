//! Standalone order domain model.
//!
//! An order is tracked either by a free-form `status` string or by a
//! boolean `completed` flag. Which one is a deployment decision
//! ([`OrderTracking`]); a single deployment never mixes the two.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to every new order in [`OrderTracking::Status`] mode.
pub const DEFAULT_ORDER_STATUS: &str = "created";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderTracking {
    /// Caller-driven status string (`created`, then anything).
    #[default]
    Status,
    /// Boolean `completed` flag flipped by `toggle_completed`.
    CompletionToggle,
}

impl FromStr for OrderTracking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "completion-toggle" | "completion_toggle" | "toggle" => Ok(Self::CompletionToggle),
            other => Err(format!("unknown order tracking mode: {other}")),
        }
    }
}

/// Progress field carried by an order; flattened into the order's JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderProgress {
    Status { status: String },
    Toggle { completed: bool },
}

impl OrderProgress {
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Status { status } => Some(status),
            Self::Toggle { .. } => None,
        }
    }

    pub fn completed(&self) -> Option<bool> {
        match self {
            Self::Toggle { completed } => Some(*completed),
            Self::Status { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub products: Vec<OrderLine>,
    #[serde(flatten)]
    pub progress: OrderProgress,
    pub created_at: DateTime<Utc>,
    pub total_price: i64,
}

/// A product line inside a standalone order. Prices are stored as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

impl OrderLine {
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(self.quantity)
    }
}

/// Fields required to insert a standalone order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub products: Vec<OrderLine>,
    pub total_price: i64,
    /// Defaults to [`DEFAULT_ORDER_STATUS`] when `None`.
    pub status: Option<String>,
    /// Defaults to the insertion time when `None`.
    pub created_at: Option<DateTime<Utc>>,
}

/// Well-known statuses used by the optional strict transition checks.
///
/// The repository accepts any status string; this machine is only
/// consulted when a service is configured for strict transitions:
///
/// ```text
/// created ──► processing ──► completed
///    │             │
///    └─────────────┴───────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Created,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Processing)
                | (Self::Created, Self::Cancelled)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_machine_allows_forward_moves_only() {
        use OrderStatus::*;
        assert!(Created.can_transition_to(Processing));
        assert!(Created.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Cancelled));

        assert!(!Created.can_transition_to(Completed));
        assert!(!Processing.can_transition_to(Created));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Processing));
        assert!(!Created.can_transition_to(Created));
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::Created,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::Created.as_str(), DEFAULT_ORDER_STATUS);
    }

    #[test]
    fn tracking_mode_parses() {
        assert_eq!("status".parse(), Ok(OrderTracking::Status));
        assert_eq!(
            "Completion-Toggle".parse(),
            Ok(OrderTracking::CompletionToggle)
        );
        assert!("both".parse::<OrderTracking>().is_err());
    }

    #[test]
    fn progress_is_flattened_into_order_json() {
        let order = Order {
            id: "o1".into(),
            user_id: "u1".into(),
            products: vec![OrderLine {
                id: "p1".into(),
                name: "Boot".into(),
                price: 10,
                quantity: 2,
            }],
            progress: OrderProgress::Status {
                status: "created".into(),
            },
            created_at: Utc::now(),
            total_price: 20,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "created");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["totalPrice"], 20);
        assert!(json.get("completed").is_none());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn toggle_progress_serializes_completed() {
        let progress = OrderProgress::Toggle { completed: true };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
        assert_eq!(progress.status(), None);
        assert_eq!(progress.completed(), Some(true));
    }

    #[test]
    fn line_subtotal() {
        let line = OrderLine {
            id: "p1".into(),
            name: String::new(),
            price: 10,
            quantity: 2,
        };
        assert_eq!(line.subtotal(), 20);
    }
}
