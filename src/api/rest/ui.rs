use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::driver::Driver;
use crate::models::order::OrderStatus;
use crate::models::view::View;
use crate::render;
use crate::session::Intent;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ui/login", post(login))
        .route("/ui/:id", get(show_dashboard))
        .route("/ui/:id/nav/:view", post(navigate))
        .route("/ui/:id/orders/:order_id/accept", post(accept_order))
        .route("/ui/:id/orders/:order_id/decline", post(decline_order))
        .route("/ui/:id/orders/:order_id/status", post(change_status))
        .route("/ui/:id/logout", post(logout))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub driver_name: String,
    pub driver_id: String,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

fn back_to(id: Uuid) -> Redirect {
    Redirect::to(&format!("/ui/{id}"))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let session = state.start_session(Driver {
        id: form.driver_id.trim().to_string(),
        name: form.driver_name.trim().to_string(),
    })?;
    Ok(back_to(session.id()))
}

async fn show_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let snapshot = state.session(id)?.snapshot();
    Ok(Html(render::dashboard(&snapshot, &state.app_name)))
}

async fn navigate(
    State(state): State<Arc<AppState>>,
    Path((id, view)): Path<(Uuid, View)>,
) -> Result<Redirect, AppError> {
    state.navigate(id, view)?;
    Ok(back_to(id))
}

async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
) -> Result<Redirect, AppError> {
    state.apply_intent(id, Intent::Accept { order_id })?;
    Ok(back_to(id))
}

async fn decline_order(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
) -> Result<Redirect, AppError> {
    state.apply_intent(id, Intent::Decline { order_id })?;
    Ok(back_to(id))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    Path((id, order_id)): Path<(Uuid, String)>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let intent = Intent::ChangeStatus {
        order_id,
        status: OrderStatus::from(form.status),
    };
    state.apply_intent(id, intent)?;
    Ok(back_to(id))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    state.end_session(id)?;
    Ok(Redirect::to("/"))
}
