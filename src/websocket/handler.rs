use crate::{
    game::GameError,
    session::SessionOwner,
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection. The connection owns one session
/// for its whole lifetime.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    let session_id = state.sessions.create(SessionOwner::Connection);
    tracing::info!("WebSocket connection established for session {}", session_id);

    if tx
        .send(ServerMessage::SessionCreated { session_id })
        .await
        .is_err()
    {
        state.sessions.remove(session_id);
        return;
    }

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let replies = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            match handle_client_message(client_msg, &state_for_recv, session_id) {
                                Ok(replies) => replies,
                                Err(e) => {
                                    tracing::warn!(
                                        "Session {} rejected message: {}",
                                        session_id,
                                        e
                                    );
                                    vec![ServerMessage::Error {
                                        message: e.to_string(),
                                    }]
                                }
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to parse message: {}", e);
                            vec![ServerMessage::Error {
                                message: format!("Invalid message format: {}", e),
                            }]
                        }
                    };

                    for reply in replies {
                        if tx.send(reply).await.is_err() {
                            return;
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client disconnected: session {}", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.sessions.remove(session_id);

    tracing::info!("WebSocket connection closed for session {}", session_id);
}

/// Apply a client message to its session and build the replies.
///
/// Runs synchronously so the session entry is never held across an await.
/// An undo with nothing to undo produces no reply.
pub(crate) fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    session_id: Uuid,
) -> Result<Vec<ServerMessage>, GameError> {
    state.sessions.with_session(session_id, |session| match msg {
        ClientMessage::StartRound => {
            session.start_round(&state.words, &mut rand::rng())?;
            Ok(vec![ServerMessage::RoundStarted {
                round: session.snapshot()?,
            }])
        }
        ClientMessage::PlaceTile { row } => {
            let tile = session.place(row)?;
            tracing::debug!(
                "Session {} placed '{}' in {:?}",
                session_id,
                tile.letter,
                row
            );

            let mut replies = vec![ServerMessage::TilePlaced {
                tile,
                row,
                round: session.snapshot()?,
            }];

            let round = session.round()?;
            if round.is_complete() {
                let (word1, word2) = round.words();
                replies.push(ServerMessage::RoundComplete {
                    word1: word1.to_string(),
                    word2: word2.to_string(),
                });
            }
            Ok(replies)
        }
        ClientMessage::Undo => match session.undo()? {
            Some(placement) => Ok(vec![ServerMessage::TileReturned {
                tile: placement.tile,
                row: placement.row,
                round: session.snapshot()?,
            }]),
            None => {
                tracing::debug!("Session {} has nothing to undo", session_id);
                Ok(Vec::new())
            }
        },
    })
}
