//! OpenAI-compatible streaming chunk.

use anyhow::{Result, anyhow};
use serde::Deserialize;

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Error payload some servers emit mid-stream instead of a choice
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// A completion choice
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Choice {
    /// Incremental content
    #[serde(default)]
    pub delta: Delta,

    /// Why the model stopped, on the last chunk
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delta {
    /// New text, if any
    #[serde(default)]
    pub content: Option<String>,
}

impl StreamChunk {
    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
    }
}

/// Extract the content token of one SSE `data:` payload.
///
/// Returns `None` for chunks without text (role headers, finish markers).
/// An unparseable payload or an in-stream error object is an error.
pub fn parse_token(data: &str) -> Result<Option<String>> {
    let chunk: StreamChunk =
        serde_json::from_str(data).map_err(|e| anyhow!("malformed chunk: {e}, data: {data}"))?;
    if let Some(error) = chunk.error {
        return Err(anyhow!("generator reported an error: {error}"));
    }
    Ok(chunk.content().map(ToOwned::to_owned))
}
