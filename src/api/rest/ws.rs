use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct WsQuery {
    /// Only forward updates for this ride.
    pub ride_id: Option<Uuid>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<WsQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.ride_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, ride_id: Option<Uuid>) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = BroadcastStream::new(state.ride_events_tx.subscribe());

    info!(ride_id = ?ride_id, "websocket client connected");

    let send_task = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "websocket subscriber lagged");
                    continue;
                }
            };

            if ride_id.is_some_and(|id| id != event.ride_id) {
                continue;
            }

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize ride event for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    first_of(send_task, recv_task).await;

    info!("websocket client disconnected");
}

/// Waits for whichever task ends first and aborts the other.
async fn first_of(mut a: JoinHandle<()>, mut b: JoinHandle<()>) {
    tokio::select! {
        _ = &mut a => b.abort(),
        _ = &mut b => a.abort(),
    }
}
