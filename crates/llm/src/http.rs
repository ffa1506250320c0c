//! Shared HTTP transport for OpenAI-compatible chat completions.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL, posts a request body with `stream: true`, and turns the
//! Server-Sent Events reply into text tokens.

use crate::{SseDecoder, stream::parse_token};
use anyhow::{Result, anyhow};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client, Method, Response,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Serialize;

/// Shared HTTP transport for OpenAI-compatible providers.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(provider)
    }

    /// Create a provider without authentication (e.g. Ollama).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/event-stream"));
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Post `body` and stream the content tokens of the SSE reply.
    ///
    /// A non-success status, an in-stream error object, or a chunk that
    /// does not parse ends the stream with an error.
    pub fn stream_sse<B: Serialize>(
        &self,
        body: &B,
    ) -> impl Stream<Item = Result<String>> + Send + use<B> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(body);
        let endpoint = self.endpoint.clone();

        try_stream! {
            let response = ensure_success(request.send().await?, &endpoint).await?;
            let mut decoder = SseDecoder::new();
            let mut bytes = response.bytes_stream();
            while let Some(next) = bytes.next().await {
                let next = next?;
                for data in decoder.feed(&next) {
                    tracing::trace!("chunk: {}", data);
                    if let Some(token) = parse_token(&data)? {
                        yield token;
                    }
                }
                if decoder.is_done() {
                    break;
                }
            }
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Turn a non-success reply into an error carrying status and body.
async fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("{endpoint} returned {status}: {body}"))
}
