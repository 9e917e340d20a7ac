use serde::Serialize;

use crate::models::order::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Unchanged,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::Unchanged => "unchanged",
        }
    }
}

pub fn find<'a>(orders: &'a [Order], order_id: &str) -> Option<&'a Order> {
    orders.iter().find(|order| order.id == order_id)
}

pub fn accept(orders: &[Order], order_id: &str) -> (Vec<Order>, Outcome) {
    change_status(orders, order_id, &OrderStatus::Accepted)
}

pub fn decline(orders: &[Order], order_id: &str) -> (Vec<Order>, Outcome) {
    let remaining: Vec<Order> = orders
        .iter()
        .filter(|order| order.id != order_id)
        .cloned()
        .collect();

    let outcome = if remaining.len() == orders.len() {
        Outcome::Unchanged
    } else {
        Outcome::Applied
    };

    (remaining, outcome)
}

pub fn change_status(
    orders: &[Order],
    order_id: &str,
    status: &OrderStatus,
) -> (Vec<Order>, Outcome) {
    let mut outcome = Outcome::Unchanged;

    let updated: Vec<Order> = orders
        .iter()
        .map(|order| {
            if order.id == order_id && order.status != *status {
                outcome = Outcome::Applied;
                order.clone().with_status(status.clone())
            } else {
                order.clone()
            }
        })
        .collect();

    (updated, outcome)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use super::{accept, change_status, decline, find, Outcome};
    use crate::models::order::{Order, OrderStatus};

    fn sample() -> Vec<Order> {
        vec![
            Order::new("A", "Alice", Decimal::new(1000, 2)),
            Order::new("B", "Bruno", Decimal::new(2000, 2)).with_status(OrderStatus::Accepted),
        ]
    }

    fn longer_sample() -> Vec<Order> {
        vec![
            Order::new("A", "Alice", Decimal::new(1000, 2)),
            Order::new("B", "Bruno", Decimal::new(2000, 2)).with_status(OrderStatus::Picked),
            Order::new("C", "Chen", Decimal::new(750, 2)).with_status(OrderStatus::AutoDispatch),
            Order::new("D", "Dana", Decimal::new(3100, 2)).with_status(OrderStatus::Completed),
        ]
    }

    #[test]
    fn absent_id_is_a_noop_for_every_operation() {
        let orders = longer_sample();

        let (accepted, outcome) = accept(&orders, "missing");
        assert_eq!(accepted, orders);
        assert_eq!(outcome, Outcome::Unchanged);

        let (declined, outcome) = decline(&orders, "missing");
        assert_eq!(declined, orders);
        assert_eq!(outcome, Outcome::Unchanged);

        let (changed, outcome) = change_status(&orders, "missing", &OrderStatus::Completed);
        assert_eq!(changed, orders);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn accept_only_touches_the_matching_status() {
        let orders = longer_sample();
        let (updated, outcome) = accept(&orders, "C");

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(updated.len(), orders.len());
        for (before, after) in orders.iter().zip(updated.iter()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.customer_name, after.customer_name);
            assert_eq!(before.order_value, after.order_value);
            if before.id == "C" {
                assert_eq!(after.status, OrderStatus::Accepted);
            } else {
                assert_eq!(before.status, after.status);
            }
        }
    }

    #[test]
    fn accept_scenario_from_pending_list() {
        let (updated, _) = accept(&sample(), "A");

        assert_eq!(
            updated,
            vec![
                Order::new("A", "Alice", Decimal::new(1000, 2)).with_status(OrderStatus::Accepted),
                Order::new("B", "Bruno", Decimal::new(2000, 2)).with_status(OrderStatus::Accepted),
            ]
        );
    }

    #[test]
    fn decline_removes_exactly_one_and_keeps_order() {
        let orders = longer_sample();
        let (remaining, outcome) = decline(&orders, "B");

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(remaining.len(), orders.len() - 1);
        let ids: Vec<&str> = remaining.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C", "D"]);
        assert_eq!(remaining[1], orders[2]);
    }

    #[test]
    fn decline_is_idempotent() {
        let (once, _) = decline(&sample(), "B");
        let (twice, outcome) = decline(&once, "B");

        assert_eq!(once, twice);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(twice, vec![Order::new("A", "Alice", Decimal::new(1000, 2))]);
    }

    #[test]
    fn change_status_allows_any_target() {
        let orders = longer_sample();

        let (rewound, outcome) = change_status(&orders, "D", &OrderStatus::Pending);
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(find(&rewound, "D").unwrap().status, OrderStatus::Pending);

        let custom = OrderStatus::from("on_hold");
        let (custom_list, _) = change_status(&orders, "A", &custom);
        assert_eq!(find(&custom_list, "A").unwrap().status, custom);
    }

    #[test]
    fn same_status_write_reports_unchanged() {
        let (updated, outcome) = change_status(&sample(), "B", &OrderStatus::Accepted);

        assert_eq!(updated, sample());
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn input_list_is_left_untouched() {
        let orders = sample();
        let snapshot = orders.clone();

        let _ = accept(&orders, "A");
        let _ = decline(&orders, "A");
        let _ = change_status(&orders, "B", &OrderStatus::Completed);

        assert_eq!(orders, snapshot);
    }
}
