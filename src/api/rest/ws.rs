use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::session::{SessionEvent, Snapshot};
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    // Subscribe first so nothing published after the initial snapshot is missed.
    let events = state.session_events_tx.subscribe();
    let initial = state.session(id)?.snapshot();
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, events, initial)))
}

pub fn session_updates(
    events: broadcast::Receiver<SessionEvent>,
    session_id: Uuid,
) -> impl Stream<Item = SessionEvent> {
    BroadcastStream::new(events).filter_map(move |event| async move {
        match event {
            Ok(event) if event.session_id() == session_id => Some(event),
            Ok(_) => None,
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "websocket subscriber lagged");
                None
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    events: broadcast::Receiver<SessionEvent>,
    initial: Snapshot,
) {
    let session_id = initial.session_id;
    let (mut sender, mut receiver) = socket.split();

    info!(session_id = %session_id, "websocket client connected");

    let send_task = tokio::spawn(async move {
        if send_event(&mut sender, &SessionEvent::Snapshot(initial)).await.is_err() {
            return;
        }

        let mut updates = std::pin::pin!(session_updates(events, session_id));
        while let Some(event) = updates.next().await {
            let ended = matches!(event, SessionEvent::Ended { .. });
            if send_event(&mut sender, &event).await.is_err() {
                return;
            }
            if ended {
                break;
            }
        }

        let _ = sender.send(Message::Close(None)).await;
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!(session_id = %session_id, "websocket client disconnected");
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &SessionEvent,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "failed to serialize session event for ws");
            return Ok(());
        }
    };

    sender.send(Message::Text(json)).await
}
