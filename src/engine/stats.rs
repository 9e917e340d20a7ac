use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Sum of every order value in the list, whatever its status.
    pub earnings: Decimal,
}

pub fn compute_stats(orders: &[Order]) -> OrderStats {
    orders.iter().fold(
        OrderStats {
            total: 0,
            pending: 0,
            in_progress: 0,
            completed: 0,
            earnings: Decimal::ZERO,
        },
        |mut stats, order| {
            stats.total += 1;
            stats.earnings += order.order_value;

            if order.status.is_pending() {
                stats.pending += 1;
            } else if order.status.is_in_progress() {
                stats.in_progress += 1;
            } else if order.status.is_completed() {
                stats.completed += 1;
            }

            stats
        },
    )
}
