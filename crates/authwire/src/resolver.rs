//! Adapter resolution
//!
//! [`AdapterResolver`] turns a requested service name into a constructed
//! adapter by dispatching on the spec's kind. It performs no caching of its
//! own; wrap it in [`CachingLookup`] to get at-most-once construction per
//! name. Composite constituents are resolved through the outermost
//! [`AdapterLookup`], so they hit the cache when one is present.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::adapter::AuthAdapter;
use crate::adapters::{CompositeAdapter, HttpAdapter, OAuth2Adapter};
use crate::config::{AdapterKind, AdapterRegistry};
use crate::container::ServiceContainer;
use crate::error::ResolveError;
use crate::matcher;

/// Trait for resolving adapter service names
///
/// The injected resolver capability passed to components that need to look
/// up adapters by service name.
pub trait AdapterLookup: Send + Sync {
    /// Resolve a service name to an adapter
    fn lookup(&self, service_name: &str) -> Result<Arc<dyn AuthAdapter>, ResolveError>;
}

/// Resolves adapter service names against a registry and container
pub struct AdapterResolver {
    registry: AdapterRegistry,
    container: Arc<dyn ServiceContainer>,
    // In-flight resolution path, used to reject cyclic composite references
    in_flight: Mutex<Vec<String>>,
}

impl AdapterResolver {
    /// Create a resolver over a registry and service container
    pub fn new(registry: AdapterRegistry, container: Arc<dyn ServiceContainer>) -> Self {
        Self {
            registry,
            container,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// The registry this resolver reads from
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Check whether a service name can be resolved, without constructing
    pub fn can_resolve(&self, service_name: &str) -> bool {
        matcher::can_resolve(service_name, &self.registry, self.container.as_ref())
    }

    /// Resolve a service name to an adapter
    pub fn resolve(&self, service_name: &str) -> Result<Arc<dyn AuthAdapter>, ResolveError> {
        self.resolve_with(service_name, self)
    }

    /// Resolve a service name, routing nested lookups through `root`
    ///
    /// Caching wrappers pass themselves as `root` so composite constituents
    /// are looked up through the cache.
    pub fn resolve_with(
        &self,
        service_name: &str,
        root: &dyn AdapterLookup,
    ) -> Result<Arc<dyn AuthAdapter>, ResolveError> {
        let name = matcher::adapter_name(service_name).ok_or_else(|| ResolveError::MissingSpec {
            service: service_name.to_string(),
        })?;

        let _guard = self.enter(service_name)?;

        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| ResolveError::MissingSpec {
                service: service_name.to_string(),
            })?;
        let kind = spec.kind().ok_or_else(|| ResolveError::InvalidKind {
            service: service_name.to_string(),
        })?;

        tracing::debug!(adapter = name, kind, "resolving adapter");

        match AdapterKind::from_name(kind) {
            AdapterKind::Http => {
                let adapter = HttpAdapter::from_options(name, spec.field("options"))?;
                Ok(Arc::new(adapter))
            }
            AdapterKind::OAuth2 => {
                let adapter = OAuth2Adapter::from_storage(name, spec.field("storage"))?;
                Ok(Arc::new(adapter))
            }
            AdapterKind::Composite => {
                let adapter = CompositeAdapter::from_spec(name, spec, root)?;
                Ok(Arc::new(adapter))
            }
            AdapterKind::Service(service) => Ok(self.container.adapter(service)?),
        }
    }

    fn enter(&self, service_name: &str) -> Result<InFlightGuard<'_>, ResolveError> {
        let mut stack = self.in_flight.lock();
        if stack.iter().any(|entry| entry == service_name) {
            return Err(ResolveError::CyclicReference {
                service: service_name.to_string(),
            });
        }
        stack.push(service_name.to_string());
        Ok(InFlightGuard {
            stack: &self.in_flight,
        })
    }
}

impl AdapterLookup for AdapterResolver {
    fn lookup(&self, service_name: &str) -> Result<Arc<dyn AuthAdapter>, ResolveError> {
        self.resolve(service_name)
    }
}

struct InFlightGuard<'a> {
    stack: &'a Mutex<Vec<String>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.stack.lock().pop();
    }
}

/// Caching decorator over an [`AdapterResolver`]
///
/// Memoizes successful resolutions per service name, giving at-most-once
/// construction within the lookup's lifetime. Failures are not cached.
pub struct CachingLookup {
    inner: AdapterResolver,
    cache: RwLock<HashMap<String, Arc<dyn AuthAdapter>>>,
}

impl CachingLookup {
    /// Wrap a resolver with a per-name cache
    pub fn new(inner: AdapterResolver) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped resolver
    pub fn resolver(&self) -> &AdapterResolver {
        &self.inner
    }
}

impl AdapterLookup for CachingLookup {
    fn lookup(&self, service_name: &str) -> Result<Arc<dyn AuthAdapter>, ResolveError> {
        if let Some(adapter) = self.cache.read().get(service_name) {
            return Ok(adapter.clone());
        }

        let adapter = self.inner.resolve_with(service_name, self)?;
        self.cache
            .write()
            .insert(service_name.to_string(), adapter.clone());
        Ok(adapter)
    }
}
