//! WebSocket protocol tests.

use care::ChatMessage;
use carehub_gateway::protocol::{ClientMessage, ServerMessage};

#[test]
fn client_ask_parses() {
    let msg: ClientMessage = serde_json::from_str(r#"{"type":"ask","content":"hello"}"#).unwrap();
    assert!(matches!(msg, ClientMessage::Ask { content } if content == "hello"));
}

#[test]
fn server_chunk_serializes() {
    let msg = ServerMessage::StreamChunk {
        content: "Hel".to_string(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"type\":\"stream_chunk\""));
    assert!(json.contains("\"content\":\"Hel\""));
}

#[test]
fn server_end_carries_message() {
    let msg = ServerMessage::StreamEnd {
        message: ChatMessage::assistant("done"),
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "stream_end");
    assert_eq!(json["message"]["role"], "assistant");
    assert_eq!(json["message"]["content"], "done");
}

#[test]
fn server_error_serializes() {
    let msg = ServerMessage::Error {
        code: 502,
        message: "response generator failed".to_string(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"code\":502"));
}

#[test]
fn ping_pong_roundtrip() {
    let ping = serde_json::to_string(&ClientMessage::Ping).unwrap();
    let parsed: ClientMessage = serde_json::from_str(&ping).unwrap();
    assert!(matches!(parsed, ClientMessage::Ping));

    let pong = serde_json::to_string(&ServerMessage::Pong).unwrap();
    let parsed: ServerMessage = serde_json::from_str(&pong).unwrap();
    assert!(matches!(parsed, ServerMessage::Pong));
}
