//! Chat completions request body.

use llm::Message;
use serde::Serialize;

/// Body of a streaming chat completions request.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// The conversation so far.
    pub messages: &'a [Message],
    /// Always `true`; replies are consumed as SSE.
    pub stream: bool,
    /// Sampling temperature, provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl<'a> Request<'a> {
    /// A streaming request for `model` over `messages`.
    pub fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages,
            stream: true,
            temperature: None,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
