use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::state::AppState;

pub const CACHE_HEADER: &str = "x-cache";

pub async fn serve_asset(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let start = Instant::now();
    let path = request.uri().path().to_string();

    if request.method() == Method::GET {
        if let Some(asset) = state.assets.lookup(&path) {
            record(&state, "hit", start);
            debug!(path = %path, "asset served from cache");

            let mut response = (StatusCode::OK, asset.body).into_response();
            if let Ok(content_type) = HeaderValue::from_str(&asset.content_type) {
                response.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            response
                .headers_mut()
                .insert(CACHE_HEADER, HeaderValue::from_static("hit"));
            return response;
        }
    }

    let mut response = match ServeDir::new(&state.web_dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };
    record(&state, "miss", start);
    debug!(path = %path, status = %response.status(), "asset fetched live");

    response
        .headers_mut()
        .insert(CACHE_HEADER, HeaderValue::from_static("miss"));
    response
}

fn record(state: &AppState, result: &str, start: Instant) {
    state
        .metrics
        .asset_requests_total
        .with_label_values(&[result])
        .inc();
    state
        .metrics
        .asset_fetch_seconds
        .with_label_values(&[result])
        .observe(start.elapsed().as_secs_f64());
}
