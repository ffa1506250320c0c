//! Gateway configuration tests.

use carehub_gateway::{
    GatewayConfig,
    config::{DEFAULT_SYSTEM_PROMPT, ProviderKind},
    utils::expand_env_vars,
};
use std::time::Duration;

#[test]
fn parse_minimal_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080

[llm]
provider = "openai"
model = "gpt-4o-mini"
api_key = "test-key"
"#;
    let config = GatewayConfig::from_toml(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.llm.provider, ProviderKind::OpenAI);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.api_key, "test-key");
    assert_eq!(config.llm.timeout_secs, 60);
    assert!(config.session.seed);
}

#[test]
fn empty_config_uses_defaults() {
    let config = GatewayConfig::from_toml("").unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8501");
    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert_eq!(config.llm.model, "llama3");
    assert_eq!(config.llm.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(config.llm.timeout(), Some(Duration::from_secs(60)));
    assert_eq!(config.session.ttl_secs, 3600);
    assert_eq!(config.session.sweep_secs, 60);
}

#[test]
fn zero_timeout_disables_it() {
    let config = GatewayConfig::from_toml("[llm]\ntimeout_secs = 0\n").unwrap();
    assert_eq!(config.llm.timeout(), None);
}

#[test]
fn parse_session_and_echo() {
    let toml = r#"
[llm]
provider = "echo"

[session]
ttl_secs = 10
seed = false
"#;
    let config = GatewayConfig::from_toml(toml).unwrap();
    assert_eq!(config.llm.provider, ProviderKind::Echo);
    assert_eq!(config.session.ttl_secs, 10);
    assert_eq!(config.session.sweep_secs, 60);
    assert!(!config.session.seed);
}

#[test]
fn unknown_provider_is_rejected() {
    assert!(GatewayConfig::from_toml("[llm]\nprovider = \"deepseek\"\n").is_err());
}

#[test]
fn env_var_expansion() {
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("CAREHUB_TEST_API_KEY", "expanded-key") };
    let toml = r#"
[llm]
api_key = "${CAREHUB_TEST_API_KEY}"
model = "${CAREHUB_TEST_UNSET_MODEL:-llama3.1}"
"#;
    let config = GatewayConfig::from_toml(toml).unwrap();
    assert_eq!(config.llm.api_key, "expanded-key");
    assert_eq!(config.llm.model, "llama3.1");
}

#[test]
fn expand_env_vars_edge_cases() {
    assert_eq!(expand_env_vars("no vars"), "no vars");
    assert_eq!(expand_env_vars("${CAREHUB_TEST_NEVER_SET}x"), "x");
    assert_eq!(expand_env_vars("a ${unterminated"), "a ${unterminated");
    assert_eq!(expand_env_vars("${CAREHUB_TEST_NEVER_SET:-}"), "");
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carehub.toml");
    std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

    let config = GatewayConfig::load(&path).unwrap();
    assert_eq!(config.server.port, 9000);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(GatewayConfig::load(&path).is_err());
    let config = GatewayConfig::load_or_default(&path).unwrap();
    assert_eq!(config.server.port, 8501);
}

#[test]
fn written_default_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carehub.toml");

    GatewayConfig::write_default(&path).unwrap();
    let config = GatewayConfig::load(&path).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8501");
    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert!(config.llm.base_url.is_none());
}

#[test]
fn load_or_default_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carehub.toml");
    std::fs::write(&path, "[llm]\nprovider = \"echo\"\n").unwrap();

    let config = GatewayConfig::load_or_default(&path).unwrap();
    assert_eq!(config.llm.provider, ProviderKind::Echo);
}
