//! Per-user session state.

use crate::{chat::Transcript, forum::Feed, resources::ResourceHub};
use compact_str::CompactString;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything one user mutates during a visit.
///
/// A session exclusively owns its feed, transcript and resources. It is
/// created when a visit starts and dropped when it ends; nothing is shared
/// across sessions.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (UUID v4).
    pub id: CompactString,
    /// Forum posts.
    pub feed: Feed,
    /// Assistant conversation.
    pub transcript: Transcript,
    /// Educational resources.
    pub resources: ResourceHub,
    /// Creation timestamp (unix seconds).
    pub created_at: u64,
    /// Last activity timestamp (unix seconds).
    pub last_active: u64,
}

impl Session {
    /// Start a session with no content.
    pub fn new() -> Self {
        Self::with_content(Feed::new(), Transcript::new(), ResourceHub::new())
    }

    /// Start a session with sample posts, the assistant greeting and the
    /// curated resources.
    pub fn seeded() -> Self {
        Self::with_content(Feed::seeded(), Transcript::seeded(), ResourceHub::seeded())
    }

    /// Record activity.
    pub fn touch(&mut self) {
        self.last_active = unix_now();
    }

    fn with_content(feed: Feed, transcript: Transcript, resources: ResourceHub) -> Self {
        let now = unix_now();
        Self {
            id: CompactString::new(uuid::Uuid::new_v4().to_string()),
            feed,
            transcript,
            resources,
            created_at: now,
            last_active: now,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
