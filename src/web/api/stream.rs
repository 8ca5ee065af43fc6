use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use uuid::Uuid;

use crate::stream::{run_subscriber, StreamError, Subscriber};
use crate::web::state::AppState;

struct WsSubscriber {
    socket: WebSocket,
}

impl Subscriber for WsSubscriber {
    async fn push(&mut self, payload: String) -> Result<(), StreamError> {
        self.socket
            .send(Message::Text(payload.into()))
            .await
            .map_err(|e| StreamError::Send(e.to_string()))
    }

    async fn closed(&mut self) {
        // incoming messages are ignored; only the end of the stream matters
        loop {
            match self.socket.recv().await {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => return,
                Some(Ok(_)) => {}
            }
        }
    }
}

/// `GET /ws/satellite_positions`: pushes every cached position on a fixed cadence
pub async fn satellite_positions(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_subscriber(socket, state))
}

async fn serve_subscriber(socket: WebSocket, state: AppState) {
    let id = Uuid::new_v4();
    log::info!("WebSocket connection accepted ({})", id);

    let mut subscriber = WsSubscriber { socket };
    match run_subscriber(&state.cache, &mut subscriber, state.config.stream.interval).await {
        Ok(()) => log::info!("Client {} disconnected", id),
        Err(e) => {
            log::warn!("WebSocket error for client {}: {}", id, e);
            let _ = subscriber.socket.send(Message::Close(None)).await;
        }
    }
}
