//! The response generator seam.

use crate::Message;
use anyhow::Result;
use futures_core::Stream;

/// A streaming text-completion service.
///
/// `stream` is handed the full conversation and yields text tokens in the
/// order the model produces them. The sequence is finite and can only be
/// restarted by calling `stream` again. An `Err` item ends the response.
pub trait Generator: Clone + Send + Sync {
    /// Stream the reply to `messages` token by token.
    fn stream(&self, messages: &[Message]) -> impl Stream<Item = Result<String>> + Send;
}
