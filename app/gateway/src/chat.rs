//! Relay between a session transcript and the response generator.
//!
//! One relay handles one question: it records the user message, opens an
//! assistant placeholder, feeds every generated token into it in arrival
//! order and closes it exactly once. Tokens are also handed to a callback
//! so a caller can render progress while the reply is still arriving.

use crate::session::SharedSession;
use anyhow::anyhow;
use care::{ChatMessage, Error, ResponseHandle, Role};
use futures_util::StreamExt;
use llm::{Generator, Message};
use std::time::Duration;

/// Reason recorded when a relay is abandoned mid-stream.
pub const INTERRUPTED: &str = "interrupted";

/// Per-relay settings.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Prepended as a system message when set.
    pub system_prompt: Option<String>,
    /// Longest wait for the next token.
    pub timeout: Option<Duration>,
}

/// Build the generator prompt from a transcript.
///
/// Messages without content (a reply that failed before its first token)
/// are left out.
pub fn prompt(system_prompt: Option<&str>, messages: &[ChatMessage]) -> Vec<Message> {
    let system = system_prompt
        .filter(|p| !p.trim().is_empty())
        .map(Message::system);
    system
        .into_iter()
        .chain(
            messages
                .iter()
                .filter(|m| !m.content.is_empty())
                .map(|m| match m.role {
                    Role::User => Message::user(m.content.clone()),
                    Role::Assistant => Message::assistant(m.content.clone()),
                }),
        )
        .collect()
}

/// Ask the generator to answer `content` and stream the reply into the
/// session transcript.
///
/// Returns the finished assistant message. A generator error or timeout
/// leaves the partial reply in place, marked failed, and surfaces as
/// [`Error::Generator`].
pub async fn relay<G: Generator>(
    session: &SharedSession,
    generator: &G,
    options: &ChatOptions,
    content: &str,
    mut on_token: impl FnMut(&str),
) -> care::Result<ChatMessage> {
    let (handle, prompt) = {
        let mut session = session.lock();
        session.touch();
        session.transcript.submit_user_message(content)?;
        let prompt = prompt(
            options.system_prompt.as_deref(),
            session.transcript.messages(),
        );
        (session.transcript.begin_assistant_response()?, prompt)
    };
    let pending = Pending {
        session,
        handle: Some(handle),
    };
    tracing::debug!("relaying {} prompt message(s)", prompt.len());

    let mut tokens = std::pin::pin!(generator.stream(&prompt));
    loop {
        let next = match options.timeout {
            Some(limit) => match tokio::time::timeout(limit, tokens.next()).await {
                Ok(next) => next,
                Err(_) => Some(Err(anyhow!(
                    "no token received within {}s",
                    limit.as_secs()
                ))),
            },
            None => tokens.next().await,
        };

        match next {
            Some(Ok(token)) => {
                session.lock().transcript.append_token(handle, &token)?;
                on_token(&token);
            }
            Some(Err(e)) => {
                let reason = e.to_string();
                tracing::warn!("response generator failed: {reason}");
                pending.fail(&reason)?;
                return Err(Error::Generator(reason));
            }
            None => break,
        }
    }

    pending.complete()
}

/// Closes the pending reply if the relay stops before doing so itself.
struct Pending<'a> {
    session: &'a SharedSession,
    handle: Option<ResponseHandle>,
}

impl Pending<'_> {
    fn complete(mut self) -> care::Result<ChatMessage> {
        let handle = self.take()?;
        let mut session = self.session.lock();
        session.touch();
        session.transcript.complete_response(handle).cloned()
    }

    fn fail(mut self, reason: &str) -> care::Result<ChatMessage> {
        let handle = self.take()?;
        self.session
            .lock()
            .transcript
            .fail_response(handle, reason)
            .cloned()
    }

    fn take(&mut self) -> care::Result<ResponseHandle> {
        self.handle
            .take()
            .ok_or_else(|| Error::State("response already closed".into()))
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        tracing::warn!("assistant response {} interrupted", handle.index());
        let _ = self
            .session
            .lock()
            .transcript
            .fail_response(handle, INTERRUPTED);
    }
}
