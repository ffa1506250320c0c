//! HTTP and WebSocket surface.
//!
//! Every session-scoped route resolves the session first; an unknown id is
//! a 404 before any body is looked at.

use crate::{session::SharedSession, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use care::Error;
use llm::Generator;
use serde_json::{Value, json};

mod chat;
mod dashboard;
mod forum;
mod resources;

/// Build the axum router for the whole application.
pub fn router<G: Generator + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/sessions", post(create_session::<G>))
        .route("/sessions/{id}", delete(delete_session::<G>))
        .route(
            "/sessions/{id}/posts",
            get(forum::list::<G>).post(forum::create::<G>),
        )
        .route(
            "/sessions/{id}/posts/{post}/comments",
            post(forum::comment::<G>),
        )
        .route("/sessions/{id}/posts/{post}/like", post(forum::like::<G>))
        .route(
            "/sessions/{id}/messages",
            get(chat::list::<G>).post(chat::ask::<G>),
        )
        .route("/sessions/{id}/ws", get(chat::ws_handler::<G>))
        .route(
            "/sessions/{id}/resources",
            get(resources::list::<G>).post(resources::submit::<G>),
        )
        .route("/dashboard", get(dashboard::overview::<G>))
        .route("/dashboard/vitals", get(dashboard::vitals::<G>))
        .route("/dashboard/labs", get(dashboard::labs::<G>))
        .route("/dashboard/history", get(dashboard::history::<G>))
        .route("/dashboard/medications", get(dashboard::medications::<G>))
        .with_state(state)
}

/// A domain error rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            tracing::warn!("request failed: {}", self.0);
        }
        let body = json!({
            "error": { "kind": self.0.kind(), "message": self.0.to_string() }
        });
        (status, Json(body)).into_response()
    }
}

/// HTTP status for a domain error.
pub fn status_of(err: &Error) -> StatusCode {
    match err {
        Error::Validation { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::State(_) => StatusCode::CONFLICT,
        Error::Generator(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Resolve a session id or fail with `NotFound`.
fn session<G: Generator>(state: &AppState<G>, id: &str) -> Result<SharedSession, ApiError> {
    state.sessions.get(id).ok_or_else(|| {
        ApiError(Error::NotFound {
            kind: "session",
            id: id.into(),
        })
    })
}

/// Pages of the application.
async fn index() -> Json<Value> {
    Json(json!({
        "name": "carehub",
        "pages": [
            {
                "name": "Dashboard",
                "path": "/dashboard",
                "description": "Vital signs, lab results, medical history and medications."
            },
            {
                "name": "Forum",
                "path": "/sessions/{id}/posts",
                "description": "Share experiences, comment on posts and like them."
            },
            {
                "name": "AI Assistant",
                "path": "/sessions/{id}/ws",
                "description": "Ask health questions and watch the answer stream in."
            },
            {
                "name": "Educational Resources",
                "path": "/sessions/{id}/resources",
                "description": "Articles, videos and guides, plus your own contributions."
            }
        ]
    }))
}

async fn create_session<G: Generator>(
    State(state): State<AppState<G>>,
) -> (StatusCode, Json<Value>) {
    let session = state.sessions.create(state.seed);
    let id = session.lock().id.clone();
    (StatusCode::CREATED, Json(json!({ "id": id })))
}

async fn delete_session<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.sessions.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError(Error::NotFound {
            kind: "session",
            id,
        })),
    }
}
