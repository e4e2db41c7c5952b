use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::message::WsFrame;
use crate::presentation::rest::AppState;

/// Handle WebSocket upgrade
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forward hub events to one client until either side goes away
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Membership is live before the client hears about it
    let mut subscription = state.hub.subscribe();
    let subscriber_id = subscription.id();
    info!(%subscriber_id, "WebSocket client connected");

    if send_frame(&mut sender, &WsFrame::Subscribed { subscriber_id })
        .await
        .is_ok()
    {
        loop {
            tokio::select! {
                event = subscription.recv() => match event {
                    Some(event) => {
                        if send_frame(&mut sender, &WsFrame::TradeSignal(event.as_ref()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    None => {
                        // Hub shut down
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                },
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(%subscriber_id, error = %e, "WebSocket receive failed");
                        break;
                    }
                    // Pings are answered by axum; nothing else is expected from clients
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    drop(subscription);
    info!(%subscriber_id, "WebSocket client disconnected");
}

/// Encode and send one frame; any failure ends the client's stream
async fn send_frame<S>(sender: &mut S, frame: &impl Serialize) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let json = serde_json::to_string(frame).map_err(|e| {
        error!(error = %e, "Failed to encode WebSocket frame");
    })?;

    sender.send(Message::Text(json.into())).await.map_err(|e| {
        debug!(error = %e, "WebSocket send failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_frame_sent_as_text() {
        let subscriber_id = Uuid::new_v4();
        let mut sent: Vec<Message> = Vec::new();

        send_frame(&mut sent, &WsFrame::Subscribed { subscriber_id })
            .await
            .unwrap();

        assert_eq!(sent.len(), 1);
        assert!(matches!(
            &sent[0],
            Message::Text(text) if text.as_str().contains(&subscriber_id.to_string())
        ));
    }

    #[tokio::test]
    async fn test_unencodable_frame_is_a_failed_send() {
        // JSON object keys must be strings
        let frame: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let mut sent: Vec<Message> = Vec::new();

        assert!(send_frame(&mut sent, &frame).await.is_err());
        assert!(sent.is_empty());
    }
}
