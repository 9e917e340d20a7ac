use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::lifecycle::{self, Outcome};
use crate::engine::stats::{compute_stats, OrderStats};
use crate::engine::transitions::TransitionPolicy;
use crate::error::AppError;
use crate::models::driver::Driver;
use crate::models::order::{Order, OrderStatus};
use crate::models::view::View;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Accept { order_id: String },
    Decline { order_id: String },
    ChangeStatus { order_id: String, status: OrderStatus },
}

impl Intent {
    pub fn operation(&self) -> &'static str {
        match self {
            Intent::Accept { .. } => "accept",
            Intent::Decline { .. } => "decline",
            Intent::ChangeStatus { .. } => "change_status",
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            Intent::Accept { order_id }
            | Intent::Decline { order_id }
            | Intent::ChangeStatus { order_id, .. } => order_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub driver: Driver,
    pub view: View,
    pub orders: Vec<Order>,
    pub stats: OrderStats,
    pub session_started_at: DateTime<Utc>,
    pub taken_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Snapshot(Snapshot),
    Ended { session_id: Uuid },
}

impl SessionEvent {
    pub fn session_id(&self) -> Uuid {
        match self {
            SessionEvent::Snapshot(snapshot) => snapshot.session_id,
            SessionEvent::Ended { session_id } => *session_id,
        }
    }
}

pub struct DashboardSession {
    id: Uuid,
    driver: Driver,
    started_at: DateTime<Utc>,
    policy: TransitionPolicy,
    orders: RwLock<Arc<Vec<Order>>>,
    view: RwLock<View>,
}

impl DashboardSession {
    pub fn new(driver: Driver, orders: Vec<Order>, policy: TransitionPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver,
            started_at: Utc::now(),
            policy,
            orders: RwLock::new(Arc::new(orders)),
            view: RwLock::new(View::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn orders(&self) -> Arc<Vec<Order>> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stats(&self) -> OrderStats {
        compute_stats(&self.orders())
    }

    pub fn view(&self) -> View {
        *self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn navigate(&self, view: View) {
        *self.view.write().unwrap_or_else(PoisonError::into_inner) = view;
    }

    pub fn snapshot(&self) -> Snapshot {
        let orders = self.orders();
        Snapshot {
            session_id: self.id,
            driver: self.driver.clone(),
            view: self.view(),
            stats: compute_stats(&orders),
            orders: orders.as_ref().clone(),
            session_started_at: self.started_at,
            taken_at: Utc::now(),
        }
    }

    pub fn apply(&self, intent: &Intent) -> Result<Outcome, AppError> {
        match intent {
            Intent::Accept { order_id } => self.accept(order_id),
            Intent::Decline { order_id } => Ok(self.decline(order_id)),
            Intent::ChangeStatus { order_id, status } => self.change_status(order_id, status),
        }
    }

    pub fn accept(&self, order_id: &str) -> Result<Outcome, AppError> {
        self.transition(order_id, &OrderStatus::Accepted, |orders| {
            lifecycle::accept(orders, order_id)
        })
    }

    pub fn decline(&self, order_id: &str) -> Outcome {
        let mut slot = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let (next, outcome) = lifecycle::decline(&slot, order_id);
        if outcome == Outcome::Applied {
            *slot = Arc::new(next);
        }
        outcome
    }

    pub fn change_status(&self, order_id: &str, status: &OrderStatus) -> Result<Outcome, AppError> {
        self.transition(order_id, status, |orders| {
            lifecycle::change_status(orders, order_id, status)
        })
    }

    fn transition<F>(
        &self,
        order_id: &str,
        target: &OrderStatus,
        apply: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce(&[Order]) -> (Vec<Order>, Outcome),
    {
        let mut slot = self.orders.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = lifecycle::find(&slot, order_id) {
            self.policy.check(&current.status, target)?;
        }

        let (next, outcome) = apply(slot.as_slice());
        if outcome == Outcome::Applied {
            *slot = Arc::new(next);
        }
        Ok(outcome)
    }
}
