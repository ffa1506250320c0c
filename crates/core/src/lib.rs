//! Session-scoped models for carehub.
//!
//! A [`Session`] owns a forum [`Feed`], an assistant [`Transcript`] and a
//! [`ResourceHub`]. The static patient [`Record`] backs the dashboard.
//! Nothing here is persisted or shared between sessions.

pub use {
    chat::{ChatMessage, MessageStatus, ResponseHandle, Role, Transcript},
    error::{Error, Result},
    forum::{Comment, Feed, Post, PostId},
    health::Record,
    resources::{Resource, ResourceHub, ResourceKind},
    session::Session,
};

pub mod chat;
pub mod error;
pub mod forum;
pub mod health;
pub mod resources;
pub mod seed;
pub mod session;
