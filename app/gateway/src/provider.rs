//! Generator selection.
//!
//! Unified `Provider` enum with enum dispatch over the concrete generators.
//! The gateway is monomorphized on `Provider`.

use crate::config::{LlmConfig, ProviderKind};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Client, Echo, Generator, Message};
use openai::OpenAI;

/// The configured response generator.
#[derive(Clone)]
pub enum Provider {
    /// OpenAI-compatible API (covers OpenAI and Ollama).
    OpenAI(OpenAI),
    /// Offline acknowledgement.
    Echo(Echo),
}

/// Construct a `Provider` from config and a shared HTTP client.
pub fn build_provider(config: &LlmConfig, client: Client) -> Result<Provider> {
    let provider = match config.provider {
        ProviderKind::Ollama => match &config.base_url {
            Some(url) => Provider::OpenAI(OpenAI::custom(client, "", url, &config.model)?),
            None => Provider::OpenAI(OpenAI::ollama(client, &config.model)),
        },
        ProviderKind::OpenAI => match &config.base_url {
            Some(url) => Provider::OpenAI(OpenAI::custom(
                client,
                &config.api_key,
                url,
                &config.model,
            )?),
            None => Provider::OpenAI(OpenAI::api(client, &config.api_key, &config.model)?),
        },
        ProviderKind::Echo => Provider::Echo(Echo),
    };
    tracing::info!(
        "provider {:?} initialized for model {}",
        config.provider,
        config.model
    );
    Ok(provider)
}

impl Generator for Provider {
    fn stream(&self, messages: &[Message]) -> impl Stream<Item = Result<String>> + Send {
        let messages = messages.to_vec();
        let this = self.clone();
        try_stream! {
            match this {
                Provider::OpenAI(p) => {
                    let mut stream = std::pin::pin!(p.stream(&messages));
                    while let Some(token) = stream.next().await {
                        yield token?;
                    }
                }
                Provider::Echo(p) => {
                    let mut stream = std::pin::pin!(p.stream(&messages));
                    while let Some(token) = stream.next().await {
                        yield token?;
                    }
                }
            }
        }
    }
}
