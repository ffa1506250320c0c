//! Assistant routes: request/response and WebSocket streaming.

use super::{ApiError, session, status_of};
use crate::{
    chat::relay,
    protocol::{ClientMessage, ServerMessage},
    session::SharedSession,
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{Message as WsMessage, WebSocket},
    },
    response::{IntoResponse, Response},
};
use care::ChatMessage;
use futures_util::{SinkExt, StreamExt};
use llm::Generator;
use serde::Deserialize;
use tokio::sync::mpsc;

/// Body of `POST /sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct Ask {
    pub content: String,
}

pub async fn list<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let session = session(&state, &id)?;
    let messages = session.lock().transcript.messages().to_vec();
    Ok(Json(messages))
}

/// Run a full relay and return the finished assistant message.
pub async fn ask<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    Json(body): Json<Ask>,
) -> Result<Json<ChatMessage>, ApiError> {
    let session = session(&state, &id)?;
    let message = relay(&session, &state.generator, &state.chat, &body.content, |_| {}).await?;
    Ok(Json(message))
}

/// WebSocket upgrade handler.
pub async fn ws_handler<G: Generator + 'static>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    match session(&state, &id) {
        Ok(session) => ws
            .on_upgrade(move |socket| handle_socket(socket, state, session))
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Handle an established WebSocket connection.
async fn handle_socket<G: Generator>(
    socket: WebSocket,
    state: AppState<G>,
    session: SharedSession,
) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Sender task: forward ServerMessages to the WebSocket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(j) => j,
                Err(e) => {
                    tracing::error!("failed to serialize server message: {e}");
                    continue;
                }
            };
            if sender.send(WsMessage::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Receiver loop: answer one question at a time.
    while let Some(Ok(ws_msg)) = receiver.next().await {
        let text = match ws_msg {
            WsMessage::Text(t) => t,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                let _ = tx.send(ServerMessage::Error {
                    code: 400,
                    message: format!("invalid message: {e}"),
                });
                continue;
            }
        };

        match client_msg {
            ClientMessage::Ask { content } => {
                // `stream_start` is announced with the first token, so a
                // rejected question gets a bare `error`.
                let mut started = false;
                let chunks = tx.clone();
                let result = relay(&session, &state.generator, &state.chat, &content, |token| {
                    if !std::mem::replace(&mut started, true) {
                        let _ = chunks.send(ServerMessage::StreamStart);
                    }
                    let _ = chunks.send(ServerMessage::StreamChunk {
                        content: token.to_owned(),
                    });
                })
                .await;
                match result {
                    Ok(message) => {
                        if !started {
                            let _ = tx.send(ServerMessage::StreamStart);
                        }
                        let _ = tx.send(ServerMessage::StreamEnd { message });
                    }
                    Err(e) => {
                        let _ = tx.send(ServerMessage::Error {
                            code: status_of(&e).as_u16(),
                            message: e.to_string(),
                        });
                    }
                }
            }
            ClientMessage::Ping => {
                let _ = tx.send(ServerMessage::Pong);
            }
        }
    }

    drop(tx);
    let _ = send_task.await;
    tracing::debug!("websocket connection closed");
}
