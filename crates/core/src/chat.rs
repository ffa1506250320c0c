//! Chat transcript model.
//!
//! A transcript is an ordered list of user and assistant messages. An
//! assistant reply is built in place: [`Transcript::begin_assistant_response`]
//! appends an empty placeholder, tokens are appended to it in arrival
//! order, and [`Transcript::complete_response`] (or
//! [`Transcript::fail_response`]) freezes it. At most one reply is pending
//! at a time.

use crate::error::{Error, Result, require};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person using the session.
    User,
    /// The response generator.
    Assistant,
}

/// Lifecycle of a message's content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MessageStatus {
    /// Content is final.
    #[default]
    Complete,
    /// Tokens are still arriving.
    Streaming,
    /// The reply stopped early; content holds whatever arrived.
    Failed {
        /// Why the reply stopped.
        reason: String,
    },
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Whether the content is final.
    #[serde(default)]
    pub status: MessageStatus,
}

impl ChatMessage {
    /// A finished user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            status: MessageStatus::Complete,
        }
    }

    /// A finished assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            status: MessageStatus::Complete,
        }
    }
}

/// Reference to the assistant message currently being streamed.
///
/// A handle is only valid until the response it names is completed or
/// failed; using it afterwards is a [`Error::State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHandle {
    index: usize,
}

impl ResponseHandle {
    /// Position of the referenced message in the transcript.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered chat history for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: Option<usize>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript opening with the assistant greeting.
    pub fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(crate::seed::GREETING)],
            pending: None,
        }
    }

    /// Append a user message.
    ///
    /// Rejected while a reply is pending so every user message is followed
    /// by exactly one assistant message.
    pub fn submit_user_message(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        require("message", &text)?;
        if self.pending.is_some() {
            return Err(Error::State(
                "cannot submit while an assistant response is pending".into(),
            ));
        }
        self.messages.push(ChatMessage::user(text));
        Ok(())
    }

    /// Append an empty assistant placeholder and return its handle.
    pub fn begin_assistant_response(&mut self) -> Result<ResponseHandle> {
        if self.pending.is_some() {
            return Err(Error::State(
                "an assistant response is already pending".into(),
            ));
        }
        let index = self.messages.len();
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: String::new(),
            status: MessageStatus::Streaming,
        });
        self.pending = Some(index);
        Ok(ResponseHandle { index })
    }

    /// Append a token to the pending response.
    pub fn append_token(&mut self, handle: ResponseHandle, token: &str) -> Result<()> {
        let message = self.pending_mut(handle)?;
        message.content.push_str(token);
        Ok(())
    }

    /// Mark the pending response finished and return it.
    pub fn complete_response(&mut self, handle: ResponseHandle) -> Result<&ChatMessage> {
        self.close(handle, MessageStatus::Complete)
    }

    /// Stop the pending response early, keeping its partial content.
    pub fn fail_response(
        &mut self,
        handle: ResponseHandle,
        reason: impl Into<String>,
    ) -> Result<&ChatMessage> {
        self.close(
            handle,
            MessageStatus::Failed {
                reason: reason.into(),
            },
        )
    }

    /// Messages in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Handle of the reply currently streaming, if any.
    pub fn pending(&self) -> Option<ResponseHandle> {
        self.pending.map(|index| ResponseHandle { index })
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn pending_mut(&mut self, handle: ResponseHandle) -> Result<&mut ChatMessage> {
        if self.pending != Some(handle.index) {
            return Err(Error::State(format!(
                "response handle {} is not pending",
                handle.index
            )));
        }
        Ok(&mut self.messages[handle.index])
    }

    fn close(&mut self, handle: ResponseHandle, status: MessageStatus) -> Result<&ChatMessage> {
        let message = self.pending_mut(handle)?;
        message.status = status;
        self.pending = None;
        Ok(&self.messages[handle.index])
    }
}
