//! OpenAI-compatible response generator.
//!
//! Covers OpenAI, a local Ollama instance, and any other service exposing
//! the OpenAI chat completions API with streaming.

use anyhow::Result;
use futures_core::Stream;
use llm::{Client, Generator, HttpProvider, Message};
pub use request::Request;

mod request;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// Ollama local chat completions.
    pub const OLLAMA: &str = "http://localhost:11434/v1/chat/completions";
}

/// An OpenAI-compatible streaming generator.
#[derive(Clone)]
pub struct OpenAI {
    http: HttpProvider,
    model: String,
    temperature: Option<f32>,
}

impl OpenAI {
    /// Target a local Ollama instance (no API key).
    pub fn ollama(client: Client, model: &str) -> Self {
        Self::unauthenticated(client, endpoint::OLLAMA, model)
    }

    /// Target the OpenAI API.
    pub fn api(client: Client, key: &str, model: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::OPENAI, model)
    }

    /// Target a custom endpoint. An empty key sends no authorization.
    pub fn custom(client: Client, key: &str, endpoint: &str, model: &str) -> Result<Self> {
        if key.is_empty() {
            return Ok(Self::unauthenticated(client, endpoint, model));
        }
        Ok(Self {
            http: HttpProvider::bearer(client, key, endpoint)?,
            model: model.to_owned(),
            temperature: None,
        })
    }

    /// Set the sampling temperature for every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The chat completions URL.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    fn unauthenticated(client: Client, endpoint: &str, model: &str) -> Self {
        Self {
            http: HttpProvider::no_auth(client, endpoint),
            model: model.to_owned(),
            temperature: None,
        }
    }
}

impl Generator for OpenAI {
    fn stream(&self, messages: &[Message]) -> impl Stream<Item = Result<String>> + Send {
        let mut request = Request::new(&self.model, messages);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        tracing::debug!(
            "streaming {} message(s) to {} ({})",
            messages.len(),
            self.http.endpoint(),
            self.model
        );
        self.http.stream_sse(&request)
    }
}
