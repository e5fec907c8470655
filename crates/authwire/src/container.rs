//! Service container abstraction
//!
//! Resolution never assumes an ambient registry: the container is an injected
//! capability. Embedders implement [`ServiceContainer`] over their own
//! service locator; [`MemoryContainer`] is a ready-made in-memory
//! implementation for tests and small deployments.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::adapter::AuthAdapter;

/// Errors surfaced by a service container lookup
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("service \"{0}\" is not registered")]
    NotFound(String),

    #[error("service \"{0}\" does not implement the adapter contract")]
    NotAnAdapter(String),

    #[error("service \"{0}\" failed to construct: {1}")]
    Construction(String, String),
}

/// Trait for the surrounding service container
///
/// Caching of constructed services (identity per name) is the container's
/// responsibility; resolution through this crate is idempotent either way.
pub trait ServiceContainer: Send + Sync {
    /// Existence check without construction
    fn contains(&self, name: &str) -> bool;

    /// Resolve a named service as an authentication adapter
    fn adapter(&self, name: &str) -> Result<Arc<dyn AuthAdapter>, ContainerError>;

    /// Whether `name` is registered and satisfies the adapter contract
    ///
    /// The default implementation forces a lookup; containers that track
    /// service types can answer without constructing.
    fn provides_adapter(&self, name: &str) -> bool {
        self.contains(name) && self.adapter(name).is_ok()
    }
}

/// In-memory service container
///
/// Services registered via [`register`](MemoryContainer::register) are
/// adapters; [`register_opaque`](MemoryContainer::register_opaque) marks a
/// name as present but not satisfying the adapter contract, the way a
/// framework container holds arbitrary unrelated services.
#[derive(Default)]
pub struct MemoryContainer {
    adapters: RwLock<HashMap<String, Arc<dyn AuthAdapter>>>,
    opaque: RwLock<HashSet<String>>,
}

impl MemoryContainer {
    /// Create a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under a service name
    pub fn register(&self, name: impl Into<String>, adapter: Arc<dyn AuthAdapter>) {
        self.adapters.write().insert(name.into(), adapter);
    }

    /// Mark a service name as registered without an adapter behind it
    pub fn register_opaque(&self, name: impl Into<String>) {
        self.opaque.write().insert(name.into());
    }
}

impl ServiceContainer for MemoryContainer {
    fn contains(&self, name: &str) -> bool {
        self.adapters.read().contains_key(name) || self.opaque.read().contains(name)
    }

    fn adapter(&self, name: &str) -> Result<Arc<dyn AuthAdapter>, ContainerError> {
        if let Some(adapter) = self.adapters.read().get(name) {
            return Ok(adapter.clone());
        }
        if self.opaque.read().contains(name) {
            return Err(ContainerError::NotAnAdapter(name.to_string()));
        }
        Err(ContainerError::NotFound(name.to_string()))
    }
}
