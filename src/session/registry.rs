//! Registry of live sessions shared across HTTP requests

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::StoreError;
use super::store::{Attributes, SessionStore};

#[derive(Debug, Clone)]
struct SessionEntry {
    attributes: Attributes,
    last_seen: DateTime<Utc>,
}

/// All sessions known to the server, keyed by session id
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store bound to one session; `now` is recorded as its last activity on read and write
    pub fn handle(&self, session_id: &str, now: DateTime<Utc>) -> SessionHandle {
        SessionHandle {
            sessions: Arc::clone(&self.sessions),
            session_id: session_id.to_string(),
            now,
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    pub fn contains(&self, session_id: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(session_id))
    }

    /// End a session, dropping whatever it held
    pub fn remove(&self, session_id: &str) -> Result<bool, StoreError> {
        let removed = self.lock()?.remove(session_id).is_some();
        if removed {
            info!("Session {} ended", session_id);
        }
        Ok(removed)
    }

    /// Drop sessions whose last activity is older than `max_idle`; returns how many were dropped
    pub fn evict_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> Result<usize, StoreError> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = now - entry.last_seen <= max_idle;
            if !keep {
                debug!("Evicting idle session {} (last seen {})", id, entry.last_seen);
            }
            keep
        });
        Ok(before - sessions.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, SessionEntry>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("Failed to lock session registry: {}", e)))
    }
}

/// [`SessionStore`] view of a single session inside a [`SessionRegistry`]
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    session_id: String,
    now: DateTime<Utc>,
}

impl SessionHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl SessionStore for SessionHandle {
    fn get(&self) -> Result<Attributes, StoreError> {
        let mut sessions = self.sessions
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("Failed to lock session {}: {}", self.session_id, e)))?;

        // Reading a live session counts as activity; unknown sessions stay unknown
        Ok(sessions
            .get_mut(&self.session_id)
            .map(|entry| {
                entry.last_seen = entry.last_seen.max(self.now);
                entry.attributes.clone()
            })
            .unwrap_or_default())
    }

    fn set(&mut self, attributes: Attributes) -> Result<(), StoreError> {
        let mut sessions = self.sessions
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("Failed to lock session {}: {}", self.session_id, e)))?;

        sessions.insert(
            self.session_id.clone(),
            SessionEntry {
                attributes,
                last_seen: self.now,
            },
        );
        Ok(())
    }
}
