//! Error types for the timer core and the session store

use thiserror::Error;

/// Failures reported by a [`SessionStore`](crate::session::SessionStore) implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session store lock poisoned: {0}")]
    Poisoned(String),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by timer operations
///
/// "No timer" and "wrong state" are not errors; those come back as
/// `Option`/`bool` results from the state machine.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("Timer duration must be a positive number of seconds, got {0}")]
    InvalidDuration(u64),

    #[error("Stored timer record under '{key}' is malformed: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TimerError {
    /// Whether the caller sent something invalid, as opposed to an internal failure
    pub fn is_validation(&self) -> bool {
        matches!(self, TimerError::InvalidDuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(TimerError::InvalidDuration(0).is_validation());
        assert!(!TimerError::Store(StoreError::Poisoned("x".into())).is_validation());
    }

    #[test]
    fn test_store_error_message_is_preserved() {
        let err: TimerError = StoreError::Unavailable("backend down".into()).into();
        assert_eq!(err.to_string(), "Session store unavailable: backend down");
    }
}
