//! Shared application state for the gateway server.

use crate::{chat::ChatOptions, session::SessionManager};
use care::health::Record;
use llm::Generator;
use std::sync::Arc;

/// Shared state available to all request handlers.
pub struct AppState<G: Generator> {
    /// Live visitor sessions.
    pub sessions: Arc<SessionManager>,
    /// Response generator (immutable after init).
    pub generator: G,
    /// Settings applied to every chat relay.
    pub chat: Arc<ChatOptions>,
    /// Health record shown on the dashboard.
    pub record: Arc<Record>,
    /// Start new sessions with sample content.
    pub seed: bool,
}

impl<G: Generator> AppState<G> {
    /// Create state around a generator with default settings.
    pub fn new(generator: G) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new()),
            generator,
            chat: Arc::new(ChatOptions::default()),
            record: Arc::new(Record::sample()),
            seed: true,
        }
    }
}

impl<G: Generator> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            generator: self.generator.clone(),
            chat: Arc::clone(&self.chat),
            record: Arc::clone(&self.record),
            seed: self.seed,
        }
    }
}
