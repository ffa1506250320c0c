//! Offline generator that acknowledges the question.
//!
//! Used when no model service is configured and in tests. The reply is
//! streamed word by word so callers exercise the same incremental path
//! as a real model.

use crate::{Generator, Message, Role};
use anyhow::Result;
use futures_core::Stream;

/// Answers every question with a fixed acknowledgement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Echo {
    /// The full reply for `question`.
    pub fn reply(question: &str) -> String {
        format!("I received your question: {question}. Here's your answer.")
    }
}

impl Generator for Echo {
    fn stream(&self, messages: &[Message]) -> impl Stream<Item = Result<String>> + Send {
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        async_stream::stream! {
            let reply = Echo::reply(&question);
            for token in reply.split_inclusive(' ') {
                yield Ok(token.to_owned());
            }
        }
    }
}
