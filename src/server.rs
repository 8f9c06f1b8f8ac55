//! Web surface: the whiteboard page and the `hand_data` WebSocket.

use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::sync::broadcast;

use crate::hub::StateHub;

pub async fn serve(hub: StateHub, host: &str, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/", get(index))
        .route("/ws/hand_data", get(ws_upgrade))
        .with_state(hub);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    log::info!("serving whiteboard on http://{host}:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(hub): State<StateHub>) -> impl IntoResponse {
    let rx = hub.subscribe();
    ws.on_upgrade(move |socket| forward_states(socket, rx))
}

/// Forward every broadcast record to one listener until it disconnects.
/// A lagged receiver just resumes from the newest records; stale gesture
/// state is worthless to the front end.
async fn forward_states(mut socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    loop {
        tokio::select! {
            record = rx.recv() => match record {
                Ok(payload) => {
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("listener lagged, skipped {skipped} records");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // The front end never sends anything meaningful; drain
                // pings and detect disconnects.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
}
