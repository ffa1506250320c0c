//! End-to-end tests against a live gateway using the echo provider.

use anyhow::anyhow;
use care::{Error, chat::MessageStatus};
use carehub_gateway::{
    AppState, GatewayConfig, ServeHandle, api::status_of, config::SessionConfig, serve,
    serve_with_config,
};
use futures_core::Stream;
use futures_util::{SinkExt, StreamExt, stream};
use llm::{Echo, Generator, Message as Prompt};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Fails every request before producing a token.
#[derive(Clone)]
struct Offline;

impl Generator for Offline {
    fn stream(&self, _messages: &[Prompt]) -> impl Stream<Item = anyhow::Result<String>> + Send {
        stream::iter([Err(anyhow!("model service unreachable"))])
    }
}

struct TestServer {
    handle: ServeHandle,
    client: Client,
}

impl TestServer {
    async fn start(extra: &str) -> Self {
        let toml = format!("[llm]\nprovider = \"echo\"\n{extra}");
        let config = GatewayConfig::from_toml(&toml).unwrap();
        let handle = serve_with_config(&config, "127.0.0.1:0").await.unwrap();
        Self {
            handle,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.handle.port)
    }

    async fn session(&self) -> String {
        let res = self.client.post(self.url("/sessions")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await.unwrap();
        body["id"].as_str().unwrap().to_owned()
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

#[tokio::test]
async fn index_lists_pages() {
    let server = TestServer::start("").await;
    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"].as_array().unwrap().len(), 4);
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn forum_flow() {
    let server = TestServer::start("").await;
    let id = server.session().await;

    let (_, posts) = server.get(&format!("/sessions/{id}/posts")).await;
    assert_eq!(posts.as_array().unwrap().len(), 7);

    let (status, post) = server
        .post(
            &format!("/sessions/{id}/posts"),
            json!({ "content": "Walked 5k today" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["author"], "You");
    assert_eq!(post["likes"], 0);
    let post_id = post["id"].as_str().unwrap().to_owned();

    let (_, posts) = server.get(&format!("/sessions/{id}/posts")).await;
    assert_eq!(posts.as_array().unwrap().len(), 8);
    assert_eq!(posts[0]["id"], post_id.as_str());

    let (status, comment) = server
        .post(
            &format!("/sessions/{id}/posts/{post_id}/comments"),
            json!({ "text": "Nice!", "author": "Bob" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["author"], "Bob");

    for expected in 1..=3 {
        let (status, likes) = server
            .post(&format!("/sessions/{id}/posts/{post_id}/like"), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(likes["likes"], expected);
    }
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let server = TestServer::start("").await;
    let id = server.session().await;

    let (status, body) = server
        .post(&format!("/sessions/{id}/posts"), json!({ "content": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation");

    let (status, body) = server
        .post(&format!("/sessions/{id}/posts/missing/like"), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");

    let (status, _) = server.get("/sessions/nope/posts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn sessions_are_isolated_and_deletable() {
    let server = TestServer::start("[session]\nseed = false\n").await;
    let a = server.session().await;
    let b = server.session().await;

    server
        .post(&format!("/sessions/{a}/posts"), json!({ "content": "mine" }))
        .await;
    let (_, posts) = server.get(&format!("/sessions/{b}/posts")).await;
    assert!(posts.as_array().unwrap().is_empty());

    let res = server
        .client
        .delete(server.url(&format!("/sessions/{a}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let (status, _) = server.get(&format!("/sessions/{a}/posts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn ask_over_http() {
    let server = TestServer::start("").await;
    let id = server.session().await;

    let (status, message) = server
        .post(
            &format!("/sessions/{id}/messages"),
            json!({ "content": "What is hypertension?" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["role"], "assistant");
    assert_eq!(message["content"], Echo::reply("What is hypertension?"));

    let (_, messages) = server.get(&format!("/sessions/{id}/messages")).await;
    let messages = messages.as_array().unwrap();
    // Greeting, question, answer.
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["content"], "What is hypertension?");
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn ask_over_websocket_streams_tokens() {
    let server = TestServer::start("").await;
    let id = server.session().await;
    let url = format!("ws://127.0.0.1:{}/sessions/{id}/ws", server.handle.port);
    let (mut socket, _) = connect_async(url).await.unwrap();

    socket
        .send(Message::text(r#"{"type":"ask","content":"hello"}"#))
        .await
        .unwrap();

    let mut streamed = String::new();
    let mut started = false;
    let end = loop {
        let msg = socket.next().await.unwrap().unwrap();
        let frame: Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
        match frame["type"].as_str().unwrap() {
            "stream_start" => started = true,
            "stream_chunk" => {
                assert!(started, "chunk before stream_start");
                streamed.push_str(frame["content"].as_str().unwrap());
            }
            "stream_end" => break frame,
            other => panic!("unexpected frame {other}"),
        }
    };

    assert!(started);
    assert_eq!(streamed, Echo::reply("hello"));
    assert_eq!(end["message"]["content"], streamed.as_str());

    socket
        .send(Message::text(r#"{"type":"ping"}"#))
        .await
        .unwrap();
    let msg = socket.next().await.unwrap().unwrap();
    assert_eq!(msg.to_text().unwrap(), r#"{"type":"pong"}"#);

    socket
        .send(Message::text(r#"{"type":"ask","content":" "}"#))
        .await
        .unwrap();
    // A rejected question is never announced as a stream.
    let msg = socket.next().await.unwrap().unwrap();
    let frame: Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["code"], 400);
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn resources_flow() {
    let server = TestServer::start("").await;
    let id = server.session().await;

    let (_, resources) = server.get(&format!("/sessions/{id}/resources")).await;
    assert_eq!(resources.as_array().unwrap().len(), 3);

    let (status, resource) = server
        .post(
            &format!("/sessions/{id}/resources"),
            json!({
                "title": "Sleep hygiene",
                "link": "https://example.org/sleep",
                "kind": "video",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resource["posted_by"], "You");

    let (status, _) = server
        .post(
            &format!("/sessions/{id}/resources"),
            json!({ "title": "No link", "link": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, resources) = server.get(&format!("/sessions/{id}/resources")).await;
    assert_eq!(resources.as_array().unwrap().len(), 4);
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn dashboard_views() {
    let server = TestServer::start("").await;

    let (status, overview) = server.get("/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["patient"]["name"], "Ali");

    let (_, vitals) = server.get("/dashboard/vitals").await;
    assert_eq!(vitals.as_array().unwrap().len(), 24);

    let (_, vitals) = server
        .get("/dashboard/vitals?from=2024-01-01&to=2024-06-30")
        .await;
    assert_eq!(vitals.as_array().unwrap().len(), 6);

    let (status, body) = server
        .get("/dashboard/vitals?from=2024-06-30&to=2024-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation");

    let (_, labs) = server.get("/dashboard/labs").await;
    assert_eq!(labs["results"].as_array().unwrap().len(), 8);

    let (_, history) = server.get("/dashboard/history").await;
    assert_eq!(history["timeline"].as_array().unwrap().len(), 4);

    let (_, medications) = server.get("/dashboard/medications").await;
    let medications = medications.as_array().unwrap();
    assert_eq!(medications.len(), 4);
    assert!(medications.iter().all(|m| m["note"].is_string()));
    server.handle.shutdown().await.unwrap();
}

#[test]
fn every_error_kind_has_a_status() {
    let cases = [
        (Error::Validation { field: "content" }, StatusCode::BAD_REQUEST),
        (
            Error::NotFound {
                kind: "post",
                id: "x".into(),
            },
            StatusCode::NOT_FOUND,
        ),
        (Error::State("pending".into()), StatusCode::CONFLICT),
        (Error::Generator("down".into()), StatusCode::BAD_GATEWAY),
    ];
    for (err, status) in cases {
        assert_eq!(status_of(&err).as_u16(), status.as_u16(), "{err}");
    }
}

#[tokio::test]
async fn generator_failure_is_bad_gateway() {
    let state = AppState::new(Offline);
    let sessions = std::sync::Arc::clone(&state.sessions);
    let handle = serve(state, &SessionConfig::default(), "127.0.0.1:0")
        .await
        .unwrap();
    let server = TestServer {
        handle,
        client: Client::new(),
    };
    let id = server.session().await;

    let (status, body) = server
        .post(&format!("/sessions/{id}/messages"), json!({ "content": "hi" }))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["kind"], "generator");

    let session = sessions.get(&id).unwrap();
    let reply = session.lock().transcript.messages().last().cloned().unwrap();
    assert!(matches!(reply.status, MessageStatus::Failed { .. }));
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn ask_while_reply_pending_is_conflict() {
    let state = AppState::new(Echo);
    let sessions = std::sync::Arc::clone(&state.sessions);
    let handle = serve(state, &SessionConfig::default(), "127.0.0.1:0")
        .await
        .unwrap();
    let server = TestServer {
        handle,
        client: Client::new(),
    };
    let id = server.session().await;
    sessions
        .get(&id)
        .unwrap()
        .lock()
        .transcript
        .begin_assistant_response()
        .unwrap();

    let (status, body) = server
        .post(&format!("/sessions/{id}/messages"), json!({ "content": "hi" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"], "state");
    server.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let result = serve(AppState::new(Echo), &SessionConfig::default(), &addr).await;
    assert!(result.is_err());
}
