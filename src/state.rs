use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assets::cache::AssetCache;
use crate::config::Config;
use crate::engine::lifecycle::Outcome;
use crate::engine::seed::mock_orders;
use crate::engine::transitions::TransitionPolicy;
use crate::error::AppError;
use crate::models::driver::Driver;
use crate::models::view::View;
use crate::observability::metrics::Metrics;
use crate::session::{DashboardSession, Intent, SessionEvent, Snapshot};

pub struct AppState {
    pub sessions: DashMap<Uuid, Arc<DashboardSession>>,
    pub session_events_tx: broadcast::Sender<SessionEvent>,
    pub assets: AssetCache,
    pub web_dir: PathBuf,
    pub app_name: String,
    pub transition_policy: TransitionPolicy,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let (session_events_tx, _unused_rx) = broadcast::channel(config.event_buffer_size);

        Self {
            sessions: DashMap::new(),
            session_events_tx,
            assets: AssetCache::new(config.asset_cache_name.clone(), config.asset_paths.clone()),
            web_dir: config.web_dir.clone(),
            app_name: config.app_name.clone(),
            transition_policy: config.transition_policy,
            metrics: Metrics::new(),
        }
    }

    pub fn start_session(&self, driver: Driver) -> Result<Arc<DashboardSession>, AppError> {
        if driver.name.trim().is_empty() {
            return Err(AppError::BadRequest("driver name cannot be empty".to_string()));
        }
        if driver.id.trim().is_empty() {
            return Err(AppError::BadRequest("driver id cannot be empty".to_string()));
        }

        let session = Arc::new(DashboardSession::new(
            driver,
            mock_orders(),
            self.transition_policy,
        ));
        self.sessions.insert(session.id(), session.clone());
        self.metrics.active_sessions.inc();

        info!(
            session_id = %session.id(),
            driver_id = %session.driver().id,
            orders = session.orders().len(),
            "dashboard session started"
        );

        Ok(session)
    }

    pub fn session(&self, id: Uuid) -> Result<Arc<DashboardSession>, AppError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("session {id} not found")))
    }

    pub fn end_session(&self, id: Uuid) -> Result<(), AppError> {
        let (_, session) = self
            .sessions
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {id} not found")))?;
        self.metrics.active_sessions.dec();
        let _ = self.session_events_tx.send(SessionEvent::Ended { session_id: id });

        info!(
            session_id = %id,
            driver_id = %session.driver().id,
            "dashboard session ended"
        );
        Ok(())
    }

    pub fn apply_intent(&self, session_id: Uuid, intent: Intent) -> Result<Snapshot, AppError> {
        let session = self.session(session_id)?;
        let operation = intent.operation();

        let outcome = match session.apply(&intent) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.metrics
                    .order_operations_total
                    .with_label_values(&[operation, "rejected"])
                    .inc();
                return Err(err);
            }
        };

        self.metrics
            .order_operations_total
            .with_label_values(&[operation, outcome.as_str()])
            .inc();

        let snapshot = session.snapshot();
        match outcome {
            Outcome::Applied => {
                info!(
                    session_id = %session_id,
                    order_id = %intent.order_id(),
                    operation,
                    "order updated"
                );
                let _ = self.session_events_tx.send(SessionEvent::Snapshot(snapshot.clone()));
            }
            Outcome::Unchanged => {
                debug!(
                    session_id = %session_id,
                    order_id = %intent.order_id(),
                    operation,
                    "order operation left list unchanged"
                );
            }
        }

        Ok(snapshot)
    }

    pub fn navigate(&self, session_id: Uuid, view: View) -> Result<Snapshot, AppError> {
        let session = self.session(session_id)?;
        session.navigate(view);
        debug!(session_id = %session_id, view = view.as_str(), "view changed");

        let snapshot = session.snapshot();
        let _ = self.session_events_tx.send(SessionEvent::Snapshot(snapshot.clone()));
        Ok(snapshot)
    }
}
