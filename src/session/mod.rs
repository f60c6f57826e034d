//! Session state module
//!
//! The attribute bag a timer lives in, and the registry that hands out one
//! bag per conversational session.

pub mod registry;
pub mod store;

pub use registry::{SessionHandle, SessionRegistry};
pub use store::{Attributes, MemorySessionStore, SessionStore};
