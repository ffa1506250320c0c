//! Carehub gateway: application shell composing configuration, sessions,
//! the response generator and the HTTP/WebSocket surface.

pub mod api;
pub mod chat;
pub mod config;
pub mod protocol;
pub mod provider;
pub mod serve;
pub mod session;
pub mod state;
pub mod utils;

pub use chat::{ChatOptions, relay};
pub use config::GatewayConfig;
pub use provider::{Provider, build_provider};
pub use serve::{ServeHandle, serve, serve_with_config};
pub use session::{SessionManager, SharedSession};
pub use state::AppState;
