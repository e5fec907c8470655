//! Configuration-driven authentication adapter resolution
//!
//! This crate provides:
//! - Service-name matching for configured adapters (`auth-adapters-<name>`)
//! - Adapter resolution dispatching on the spec's kind (HTTP, OAuth2,
//!   composite, or an externally-registered container service)
//! - Composite adapters aggregating named adapters under one identity
//! - A best-effort pass attaching every configured adapter to a listener
//!
//! The service container and configuration loading are external
//! collaborators: configuration arrives as a `serde_json::Value` tree and
//! the container is injected behind the [`ServiceContainer`] trait.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use authwire::{
//!     attach_configured_adapters, AdapterRegistry, AdapterResolver,
//!     AuthenticationListener, CachingLookup, MemoryContainer,
//! };
//!
//! let config = serde_json::json!({
//!     "authentication": {
//!         "adapters": {
//!             "tokens": {
//!                 "adapter": "oauth2",
//!                 "storage": { "adapter": "memory", "tokens": { "tok": "alice" } },
//!             },
//!         }
//!     }
//! });
//!
//! let registry = AdapterRegistry::from_value(&config).unwrap();
//! let container = Arc::new(MemoryContainer::new());
//! let lookup = CachingLookup::new(AdapterResolver::new(registry, container));
//!
//! let listener = attach_configured_adapters(AuthenticationListener::new(), &config, &lookup);
//! assert_eq!(listener.adapters().len(), 1);
//! ```

pub mod adapter;
pub mod adapters;
pub mod config;
pub mod container;
pub mod error;
pub mod listener;
pub mod matcher;
pub mod resolver;

// Re-export core types
pub use adapter::{AuthAdapter, AuthRequest, Identity};
pub use adapters::{CompositeAdapter, HttpAdapter, HttpOptions, OAuth2Adapter, StorageOptions};
pub use config::{AdapterKind, AdapterRegistry, AdapterSpec};
pub use container::{ContainerError, MemoryContainer, ServiceContainer};
pub use error::ResolveError;
pub use listener::{AuthenticationListener, attach_configured_adapters};
pub use matcher::{SERVICE_PREFIX, can_resolve};
pub use resolver::{AdapterLookup, AdapterResolver, CachingLookup};
