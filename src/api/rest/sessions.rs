use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::stats::OrderStats;
use crate::error::AppError;
use crate::models::driver::Driver;
use crate::models::order::{Order, OrderStatus};
use crate::models::view::View;
use crate::session::{Intent, Snapshot};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/:id", get(get_session).delete(end_session))
        .route("/sessions/:id/orders", get(list_orders))
        .route("/sessions/:id/stats", get(get_stats))
        .route("/sessions/:id/view", put(navigate))
        .route("/sessions/:id/orders/:order_id/accept", post(accept_order))
        .route("/sessions/:id/orders/:order_id/decline", post(decline_order))
        .route("/sessions/:id/orders/:order_id/status", post(change_status))
}

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pub driver: Driver,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub status: OrderStatus,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<Snapshot>), AppError> {
    let session = state.start_session(payload.driver)?;
    Ok((StatusCode::CREATED, Json(session.snapshot())))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.session(id)?.snapshot()))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.end_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.session(id)?.orders();
    Ok(Json(orders.as_ref().clone()))
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderStats>, AppError> {
    Ok(Json(state.session(id)?.stats()))
}

async fn navigate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.navigate(id, payload.view)?))
}

async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.apply_intent(id, Intent::Accept { order_id })?))
}

async fn decline_order(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.apply_intent(id, Intent::Decline { order_id })?))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
    Json(payload): Json<ChangeStatusRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let intent = Intent::ChangeStatus {
        order_id,
        status: payload.status,
    };
    Ok(Json(state.apply_intent(id, intent)?))
}
