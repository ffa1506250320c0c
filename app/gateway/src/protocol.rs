//! Assistant chat WebSocket messages.

use care::ChatMessage;
use serde::{Deserialize, Serialize};

/// Messages sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask the assistant a question.
    Ask {
        /// Question text.
        content: String,
    },
    /// Keepalive.
    Ping,
}

/// Messages sent by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The assistant started answering.
    StreamStart,
    /// A token of the answer, in generation order.
    StreamChunk {
        /// Token text.
        content: String,
    },
    /// The answer is complete.
    StreamEnd {
        /// The finished assistant message.
        message: ChatMessage,
    },
    /// The request failed.
    Error {
        /// HTTP-style status code.
        code: u16,
        /// Error message.
        message: String,
    },
    /// Reply to a ping.
    Pong,
}
