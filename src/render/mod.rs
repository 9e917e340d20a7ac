use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use url::Url;
use uuid::Uuid;

use crate::engine::stats::OrderStats;
use crate::models::order::{Order, OrderStatus};
use crate::models::view::View;
use crate::session::Snapshot;

const RECENT_ORDERS: usize = 3;
const ACTION_BASE: &str = "http://dashboard.local/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Yellow,
    Purple,
    Green,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Blue => "tone-blue",
            Tone::Yellow => "tone-yellow",
            Tone::Purple => "tone-purple",
            Tone::Green => "tone-green",
        }
    }
}

pub fn dashboard(snapshot: &Snapshot, app_name: &str) -> String {
    let content = match snapshot.view {
        View::Home => home(snapshot),
        View::Orders => orders(snapshot),
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{app} - {title}</title>\n\
         <link rel=\"stylesheet\" href=\"/assets/app.css\">\n\
         </head>\n<body>\n\
         <div class=\"status-bar\"></div>\n\
         <header class=\"app-header\"><h1>{title}</h1></header>\n\
         <main class=\"content\">\n{content}</main>\n\
         {nav}\
         </body>\n</html>\n",
        app = escape(app_name),
        title = snapshot.view.title(),
        content = content,
        nav = bottom_nav(snapshot.session_id, snapshot.view, &snapshot.stats),
    )
}

pub fn stats_card(title: &str, value: &str, tone: Tone) -> String {
    format!(
        "<div class=\"stats-card {tone}\"><p class=\"stats-title\">{title}</p>\
         <p class=\"stats-value\">{value}</p></div>\n",
        tone = tone.class(),
        title = escape(title),
        value = escape(value),
    )
}

pub fn order_card(session_id: Uuid, order: &Order) -> String {
    let mut actions = String::new();

    if order.status.is_pending() {
        let _ = write!(
            actions,
            "<form method=\"post\" action=\"{accept}\">\
             <button class=\"btn btn-accept\" type=\"submit\">Accept</button></form>\
             <form method=\"post\" action=\"{decline}\">\
             <button class=\"btn btn-decline\" type=\"submit\">Decline</button></form>",
            accept = order_action(session_id, &order.id, "accept"),
            decline = order_action(session_id, &order.id, "decline"),
        );
    } else if let Some(next) = order.status.next() {
        let _ = write!(
            actions,
            "<form method=\"post\" action=\"{action}\">\
             <input type=\"hidden\" name=\"status\" value=\"{value}\">\
             <button class=\"btn btn-advance\" type=\"submit\">Mark {label}</button></form>",
            action = order_action(session_id, &order.id, "status"),
            value = next.as_str(),
            label = next.label(),
        );
    }

    format!(
        "<article class=\"order-card\" id=\"order-{id}\">\
         <div class=\"order-head\"><div><p class=\"order-customer\">{customer}</p>\
         <p class=\"order-id\">{id}</p></div>{badge}</div>\
         <p class=\"order-value\">${value}</p>\
         <div class=\"order-actions\">{actions}</div></article>\n",
        id = escape(&order.id),
        customer = escape(&order.customer_name),
        badge = status_badge(&order.status),
        value = money(order.order_value, 2),
    )
}

pub fn status_badge(status: &OrderStatus) -> String {
    let tone = match status {
        OrderStatus::Pending => "badge-yellow",
        OrderStatus::Accepted => "badge-green",
        _ => "badge-blue",
    };
    format!("<span class=\"badge {tone}\">{}</span>", escape(&status.label()))
}

fn home(snapshot: &Snapshot) -> String {
    let sid = snapshot.session_id;
    let stats = &snapshot.stats;
    let mut html = String::new();

    let _ = write!(
        html,
        "<section class=\"panel driver\"><div class=\"avatar\"></div>\
         <div><h2>{name}</h2><p class=\"driver-id\">{id}</p>\
         <p class=\"online\"><span class=\"dot\"></span>Online</p></div>\
         <form method=\"post\" action=\"/ui/{sid}/logout\">\
         <button class=\"btn btn-logout\" type=\"submit\">Log out</button></form></section>\n",
        name = escape(&snapshot.driver.name),
        id = escape(&snapshot.driver.id),
    );

    html.push_str("<section class=\"stats-grid\">\n");
    html.push_str(&stats_card("Total Orders", &stats.total.to_string(), Tone::Blue));
    html.push_str(&stats_card("Pending", &stats.pending.to_string(), Tone::Yellow));
    html.push_str(&stats_card(
        "In Progress",
        &stats.in_progress.to_string(),
        Tone::Purple,
    ));
    html.push_str(&stats_card(
        "Today's Earnings",
        &format!("${}", money(stats.earnings, 0)),
        Tone::Green,
    ));
    html.push_str("</section>\n");

    let _ = write!(
        html,
        "<section class=\"panel recent\"><div class=\"panel-head\"><h3>Recent Orders</h3>\
         <form method=\"post\" action=\"/ui/{sid}/nav/orders\">\
         <button class=\"link\" type=\"submit\">View All</button></form></div>\n"
    );
    for order in snapshot.orders.iter().take(RECENT_ORDERS) {
        let _ = write!(
            html,
            "<div class=\"recent-row\"><div><p class=\"order-customer\">{customer}</p>\
             <p class=\"order-value\">${value}</p></div>{badge}</div>\n",
            customer = escape(&order.customer_name),
            value = money(order.order_value, 2),
            badge = status_badge(&order.status),
        );
    }
    html.push_str("</section>\n");

    html
}

fn orders(snapshot: &Snapshot) -> String {
    let mut html = String::from(
        "<section class=\"panel\"><h2>Incoming Orders</h2>\
         <p class=\"muted\">Manage your delivery orders</p></section>\n",
    );

    if snapshot.orders.is_empty() {
        html.push_str(
            "<section class=\"panel empty\"><h3>No orders available</h3>\
             <p class=\"muted\">New orders will appear here when available.</p></section>\n",
        );
        return html;
    }

    for order in &snapshot.orders {
        html.push_str(&order_card(snapshot.session_id, order));
    }
    html
}

fn bottom_nav(session_id: Uuid, active: View, stats: &OrderStats) -> String {
    let tab = |view: View, label: &str, extra: &str| {
        let class = if view == active { "tab active" } else { "tab" };
        format!(
            "<form method=\"post\" action=\"/ui/{session_id}/nav/{path}\">\
             <button class=\"{class}\" type=\"submit\">{label}{extra}</button></form>",
            path = view.as_str(),
        )
    };

    let badge = if stats.pending > 0 {
        format!("<span class=\"nav-badge\">{}</span>", stats.pending)
    } else {
        String::new()
    };

    format!(
        "<nav class=\"bottom-nav\">{}{}</nav>\n",
        tab(View::Home, "Home", ""),
        tab(View::Orders, "Orders", &badge),
    )
}

fn order_action(session_id: Uuid, order_id: &str, action: &str) -> String {
    let session = session_id.to_string();
    let mut url = Url::parse(ACTION_BASE).expect("action base url is valid");
    url.path_segments_mut()
        .expect("http urls have path segments")
        .clear()
        .extend(["ui", session.as_str(), "orders", order_id, action]);
    escape(url.path())
}

pub fn money(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{dashboard, escape, money, order_card, status_badge};
    use crate::engine::stats::compute_stats;
    use crate::models::driver::Driver;
    use crate::models::order::{Order, OrderStatus};
    use crate::models::view::View;
    use crate::session::Snapshot;

    fn snapshot(view: View, orders: Vec<Order>) -> Snapshot {
        Snapshot {
            session_id: Uuid::from_u128(7),
            driver: Driver {
                id: "DRV-42".to_string(),
                name: "Sam <Driver>".to_string(),
            },
            view,
            stats: compute_stats(&orders),
            orders,
            session_started_at: Utc::now(),
            taken_at: Utc::now(),
        }
    }

    fn orders() -> Vec<Order> {
        vec![
            Order::new("A", "Alice", Decimal::new(1000, 2)),
            Order::new("B", "Bruno", Decimal::new(2050, 2))
                .with_status(OrderStatus::Accepted),
            Order::new("C", "Chen", Decimal::new(500, 2)).with_status(OrderStatus::Picked),
            Order::new("D", "Dana", Decimal::new(725, 2))
                .with_status(OrderStatus::Completed),
        ]
    }

    #[test]
    fn home_shows_driver_stats_and_three_recent_orders() {
        let html = dashboard(&snapshot(View::Home, orders()), "DriverApp");

        assert!(html.contains("<h1>Dashboard</h1>"));
        assert!(html.contains("Sam &lt;Driver&gt;"));
        assert!(html.contains("DRV-42"));
        assert!(html.contains("Today&#39;s Earnings"));
        assert!(html.contains("$43"));
        assert!(html.contains("$10.00"));
        assert!(html.contains("$20.50"));
        assert!(html.contains("Alice"));
        assert!(html.contains("Chen"));
        assert!(!html.contains("Dana"));
        assert!(html.contains("View All"));
    }

    #[test]
    fn orders_view_renders_a_card_per_order() {
        let html = dashboard(&snapshot(View::Orders, orders()), "DriverApp");

        assert!(html.contains("<h1>Orders</h1>"));
        assert!(html.contains("Incoming Orders"));
        assert_eq!(html.matches("class=\"order-card\"").count(), 4);
        assert!(!html.contains("No orders available"));
    }

    #[test]
    fn empty_orders_view_shows_placeholder() {
        let html = dashboard(&snapshot(View::Orders, vec![]), "DriverApp");
        assert!(html.contains("No orders available"));
    }

    #[test]
    fn pending_badge_only_when_something_is_pending() {
        let with_pending = dashboard(&snapshot(View::Home, orders()), "DriverApp");
        assert!(with_pending.contains("<span class=\"nav-badge\">1</span>"));

        let none_pending = dashboard(
            &snapshot(
                View::Home,
                vec![
                    Order::new("B", "Bruno", Decimal::new(100, 2))
                        .with_status(OrderStatus::Completed),
                ],
            ),
            "DriverApp",
        );
        assert!(!none_pending.contains("nav-badge"));
    }

    #[test]
    fn card_actions_follow_the_status() {
        let sid = Uuid::from_u128(7);

        let pending = order_card(sid, &Order::new("A", "Alice", Decimal::new(100, 2)));
        assert!(pending.contains(&format!("action=\"/ui/{sid}/orders/A/accept\"")));
        assert!(pending.contains("/orders/A/decline"));

        let picked = Order::new("C", "Chen", Decimal::new(100, 2)).with_status(OrderStatus::Picked);
        let picked = order_card(sid, &picked);
        assert!(picked.contains("/orders/C/status"));
        assert!(picked.contains("value=\"driver_at_dropoff\""));
        assert!(!picked.contains("/accept"));

        let done =
            Order::new("D", "Dana", Decimal::new(100, 2)).with_status(OrderStatus::Completed);
        assert!(!order_card(sid, &done).contains("<form"));
    }

    #[test]
    fn order_ids_are_encoded_as_one_path_segment() {
        let sid = Uuid::from_u128(7);
        let card = order_card(sid, &Order::new("A/B?c#d", "Alice", Decimal::new(100, 2)));

        assert!(card.contains("/orders/A%2FB%3Fc%23d/accept\""));
        assert!(card.contains("/orders/A%2FB%3Fc%23d/decline\""));
        assert!(!card.contains("/orders/A/B"));
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(money(Decimal::new(4275, 2), 0), "43");
        assert_eq!(money(Decimal::new(4250, 2), 0), "43");
        assert_eq!(money(Decimal::new(4249, 2), 0), "42");
        assert_eq!(money(Decimal::new(10, 0), 2), "10.00");
        assert_eq!(money(Decimal::new(1999, 2), 2), "19.99");
    }

    #[test]
    fn badge_colours() {
        assert!(status_badge(&OrderStatus::Pending).contains("badge-yellow"));
        assert!(status_badge(&OrderStatus::Accepted).contains("badge-green"));
        assert!(status_badge(&OrderStatus::AutoDispatch).contains("badge-blue"));
        assert!(status_badge(&OrderStatus::from("weird")).contains("badge-blue"));
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
