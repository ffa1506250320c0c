//! Forum routes.

use super::{ApiError, session};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use care::{
    Comment, Post, PostId,
    forum::{DEFAULT_AUTHOR, DEFAULT_COMMENT_AVATAR, DEFAULT_POST_AVATAR},
};
use llm::Generator;
use serde::Deserialize;
use serde_json::{Value, json};

/// Body of `POST /sessions/{id}/posts`.
#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Body of `POST /sessions/{id}/posts/{post}/comments`.
#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

pub async fn list<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let session = session(&state, &id)?;
    let posts = session.lock().feed.posts().to_vec();
    Ok(Json(posts))
}

pub async fn create<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    Json(body): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let session = session(&state, &id)?;
    let mut session = session.lock();
    session.touch();
    let post = session
        .feed
        .create_post(
            body.author.unwrap_or_else(|| DEFAULT_AUTHOR.into()),
            body.avatar.unwrap_or_else(|| DEFAULT_POST_AVATAR.into()),
            body.content,
        )?
        .clone();
    tracing::debug!("session {id}: created post {}", post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn comment<G: Generator>(
    State(state): State<AppState<G>>,
    Path((id, post)): Path<(String, String)>,
    Json(body): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let session = session(&state, &id)?;
    let mut session = session.lock();
    session.touch();
    let comment = session
        .feed
        .add_comment(
            &PostId::from(post.as_str()),
            body.author.unwrap_or_else(|| DEFAULT_AUTHOR.into()),
            body.avatar.unwrap_or_else(|| DEFAULT_COMMENT_AVATAR.into()),
            body.text,
        )?
        .clone();
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn like<G: Generator>(
    State(state): State<AppState<G>>,
    Path((id, post)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let session = session(&state, &id)?;
    let mut session = session.lock();
    session.touch();
    let likes = session.feed.like_post(&PostId::from(post.as_str()))?;
    Ok(Json(json!({ "likes": likes })))
}
