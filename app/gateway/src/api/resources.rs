//! Educational resource routes.

use super::{ApiError, session};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use care::{Resource, ResourceKind, forum::DEFAULT_AUTHOR};
use llm::Generator;
use serde::Deserialize;

/// Body of `POST /sessions/{id}/resources`.
#[derive(Debug, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ResourceKind,
    #[serde(default)]
    pub posted_by: Option<String>,
}

pub async fn list<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let session = session(&state, &id)?;
    let resources = session.lock().resources.list().to_vec();
    Ok(Json(resources))
}

pub async fn submit<G: Generator>(
    State(state): State<AppState<G>>,
    Path(id): Path<String>,
    Json(body): Json<NewResource>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let session = session(&state, &id)?;
    let mut session = session.lock();
    session.touch();
    let resource = session
        .resources
        .submit(Resource {
            title: body.title,
            description: body.description,
            kind: body.kind,
            link: body.link,
            posted_by: body
                .posted_by
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.into()),
            image: None,
        })?
        .clone();
    Ok((StatusCode::CREATED, Json(resource)))
}
