//! Session attribute bag capability

use serde_json::{Map, Value};

use crate::error::StoreError;

/// The per-session key/value bag
pub type Attributes = Map<String, Value>;

/// Read/write access to the attributes of one conversational session
///
/// Implementations give no transactional guarantees beyond read, mutate in
/// memory, write back within a single invocation. Two overlapping writers
/// for the same session can lose an update; callers that need stronger
/// behavior must serialize requests per session themselves.
pub trait SessionStore {
    /// Snapshot of the session's attributes (empty for a new session)
    fn get(&self) -> Result<Attributes, StoreError>;

    /// Replace the session's attributes
    fn set(&mut self, attributes: Attributes) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self) -> Result<Attributes, StoreError> {
        (**self).get()
    }

    fn set(&mut self, attributes: Attributes) -> Result<(), StoreError> {
        (**self).set(attributes)
    }
}

/// A standalone in-memory bag, for embedding the timer without a registry
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    attributes: Attributes,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Attributes, StoreError> {
        Ok(self.attributes.clone())
    }

    fn set(&mut self, attributes: Attributes) -> Result<(), StoreError> {
        self.attributes = attributes;
        Ok(())
    }
}
