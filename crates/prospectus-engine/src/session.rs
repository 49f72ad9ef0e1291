//! Session identity for a single chat process.
//!
//! A session is created once at startup and handed to the controller.
//! Its identifier is forwarded with every answer request so a backend can
//! keep conversational continuity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for generated session identifiers.
const SESSION_PREFIX: &str = "user_";

/// Opaque, time-derived session identifier (e.g. `user_1718000000000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Derive an identifier from a specific instant.
    pub fn from_time(at: DateTime<Utc>) -> Self {
        Self(format!("{SESSION_PREFIX}{}", at.timestamp_millis()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context object for one chat session.
///
/// Nothing on it is mutable after construction.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a new session now.
    pub fn start() -> Self {
        let started_at = Utc::now();
        let session = Self {
            id: SessionId::from_time(started_at),
            started_at,
        };
        tracing::info!(session_id = %session.id, "session started");
        session
    }

    /// Build a session with a fixed identifier (for tests and replays).
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            started_at: Utc::now(),
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
