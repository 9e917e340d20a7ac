use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    AutoDispatch,
    Accepted,
    DriverAtPickup,
    Picked,
    DriverAtDropoff,
    Completed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::AutoDispatch => "auto_dispatch",
            OrderStatus::Accepted => "accepted",
            OrderStatus::DriverAtPickup => "driver_at_pickup",
            OrderStatus::Picked => "picked",
            OrderStatus::DriverAtDropoff => "driver_at_dropoff",
            OrderStatus::Completed => "completed",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::AutoDispatch)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            OrderStatus::Accepted
                | OrderStatus::DriverAtPickup
                | OrderStatus::Picked
                | OrderStatus::DriverAtDropoff
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending | OrderStatus::AutoDispatch => Some(OrderStatus::Accepted),
            OrderStatus::Accepted => Some(OrderStatus::DriverAtPickup),
            OrderStatus::DriverAtPickup => Some(OrderStatus::Picked),
            OrderStatus::Picked => Some(OrderStatus::DriverAtDropoff),
            OrderStatus::DriverAtDropoff => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Other(_) => None,
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => OrderStatus::Pending,
            "auto_dispatch" => OrderStatus::AutoDispatch,
            "accepted" => OrderStatus::Accepted,
            "driver_at_pickup" => OrderStatus::DriverAtPickup,
            "picked" => OrderStatus::Picked,
            "driver_at_dropoff" => OrderStatus::DriverAtDropoff,
            "completed" => OrderStatus::Completed,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        OrderStatus::from(raw.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub order_value: Decimal,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        order_value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            customer_name: customer_name.into(),
            order_value: order_value.max(Decimal::ZERO),
            status: OrderStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}
