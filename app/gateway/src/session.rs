//! Gateway session registry.
//!
//! Each visitor gets its own [`Session`] behind its own lock. The registry
//! only maps ids to sessions; it never lets one session see another's
//! state.

use care::{Session, session::unix_now};
use compact_str::CompactString;
use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};

/// A session shared between the handlers serving it.
pub type SharedSession = Arc<Mutex<Session>>;

/// Tracks live sessions with thread-safe interior mutability.
pub struct SessionManager {
    sessions: Mutex<BTreeMap<CompactString, SharedSession>>,
}

impl SessionManager {
    /// Create a new empty session manager.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Start a session, optionally with sample content.
    pub fn create(&self, seeded: bool) -> SharedSession {
        let session = if seeded {
            Session::seeded()
        } else {
            Session::new()
        };
        let id = session.id.clone();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.lock().insert(id.clone(), Arc::clone(&shared));
        tracing::info!("created session {id}");
        shared
    }

    /// Get a session by ID.
    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.lock().get(id).cloned()
    }

    /// End a session.
    pub fn remove(&self, id: &str) -> Option<SharedSession> {
        let removed = self.sessions.lock().remove(id);
        if removed.is_some() {
            tracing::info!("removed session {id}");
        }
        removed
    }

    /// Record activity on a session.
    pub fn touch(&self, id: &str) {
        if let Some(session) = self.get(id) {
            session.lock().touch();
        }
    }

    /// Drop sessions idle for longer than `max_age_secs`.
    ///
    /// A session with an assistant reply still streaming, or whose lock is
    /// held, counts as active.
    pub fn cleanup_expired(&self, max_age_secs: u64) -> usize {
        let cutoff = unix_now().saturating_sub(max_age_secs);
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| match s.try_lock() {
            Some(session) => {
                session.transcript.pending().is_some() || session.last_active >= cutoff
            }
            None => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!("expired {removed} idle session(s)");
        }
        removed
    }

    /// Get the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Check if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
