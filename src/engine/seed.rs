use rust_decimal::Decimal;

use crate::models::order::Order;

const MOCK_ORDERS: &[(&str, &str, i64)] = &[
    ("ORD-1001", "Sarah Johnson", 2450),
    ("ORD-1002", "Michael Chen", 3875),
    ("ORD-1003", "Emma Rodriguez", 1520),
    ("ORD-1004", "David Kim", 5200),
    ("ORD-1005", "Olivia Brown", 1999),
];

pub fn mock_orders() -> Vec<Order> {
    MOCK_ORDERS
        .iter()
        .map(|(id, customer, cents)| Order::new(*id, *customer, Decimal::new(*cents, 2)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::mock_orders;
    use crate::models::order::OrderStatus;

    #[test]
    fn seed_is_pending_with_unique_ids() {
        let orders = mock_orders();
        assert!(!orders.is_empty());

        let ids: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), orders.len());

        assert!(orders.iter().all(|o| o.status == OrderStatus::Pending));
        assert!(orders.iter().all(|o| !o.order_value.is_sign_negative()));
    }
}
