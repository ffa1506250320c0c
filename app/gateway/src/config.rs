//! Gateway configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "carehub.toml";

/// Prompt prepended to every assistant conversation by default.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly healthcare assistant. \
Answer general health questions clearly and concisely, and remind the user to \
consult a medical professional for diagnosis or treatment.";

/// Top-level gateway configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Response generator configuration.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Session lifecycle configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
        }
    }
}

/// Response generator configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which generator to use.
    pub provider: ProviderKind,
    /// Model identifier.
    pub model: String,
    /// API key (supports `${ENV_VAR}` expansion).
    pub api_key: String,
    /// Optional endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// System prompt prepended to the transcript. Empty disables it.
    pub system_prompt: String,
    /// Longest wait for the next token, in seconds. Zero waits forever.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            model: "llama3".into(),
            api_key: String::new(),
            base_url: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Per-token timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Supported generator kinds.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Ollama local API, OpenAI-compatible, no key required (default).
    #[default]
    Ollama,
    /// OpenAI API or any compatible endpoint.
    #[serde(rename = "openai")]
    OpenAI,
    /// Offline acknowledgement, no model service needed.
    Echo,
}

/// Session lifecycle configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time after which a session is discarded, in seconds.
    pub ttl_secs: u64,
    /// Interval between expiry sweeps, in seconds.
    pub sweep_secs: u64,
    /// Start sessions with sample posts, greeting and resources.
    pub seed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            sweep_secs: 60,
            seed: true,
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string into a `GatewayConfig`, expanding environment
    /// variables first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let config = Self::load(path)?;
            tracing::info!("loaded configuration from {}", path.display());
            return Ok(config);
        }
        tracing::info!("{} not found, using default configuration", path.display());
        Ok(Self::default())
    }

    /// Write the default configuration to `path`.
    pub fn write_default(path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(&Self::default())
            .context("failed to serialize default config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// `host:port` to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
