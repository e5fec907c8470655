//! Authentication listener and configuration-driven attachment
//!
//! The listener holds the ordered set of adapters consulted per request.
//! [`attach_configured_adapters`] is a best-effort decoration pass: every
//! configured adapter that resolves is attached, and any that fails to
//! resolve is skipped so one misconfigured adapter cannot take down the
//! rest.

use std::sync::Arc;

use serde_json::Value;

use crate::adapter::{AuthAdapter, AuthRequest, Identity};
use crate::config::AdapterRegistry;
use crate::matcher;
use crate::resolver::AdapterLookup;

/// Listener dispatching authentication across attached adapters
///
/// Attachment order is precedence order: the first attached adapter that can
/// handle a request authenticates it.
#[derive(Default)]
pub struct AuthenticationListener {
    adapters: Vec<Arc<dyn AuthAdapter>>,
}

impl AuthenticationListener {
    /// Create a listener with no adapters attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an adapter
    pub fn attach(&mut self, adapter: Arc<dyn AuthAdapter>) {
        self.adapters.push(adapter);
    }

    /// Attached adapters in precedence order
    pub fn adapters(&self) -> &[Arc<dyn AuthAdapter>] {
        &self.adapters
    }

    /// Authenticate a request against the attached adapters
    pub fn authenticate(&self, request: &AuthRequest<'_>) -> Option<Identity> {
        for adapter in &self.adapters {
            if adapter.can_handle(request) {
                tracing::debug!(provides = ?adapter.provides(), "adapter handling request");
                return adapter.authenticate(request);
            }
        }
        None
    }
}

/// Attach every configured adapter to a listener, best effort
///
/// Reads `authentication.adapters` from the configuration tree; when the
/// subtree is absent or not a mapping the listener is returned unchanged.
/// Per entry, resolution failures are logged and skipped; this pass never
/// fails.
pub fn attach_configured_adapters(
    mut listener: AuthenticationListener,
    config: &Value,
    lookup: &dyn AdapterLookup,
) -> AuthenticationListener {
    let Some(registry) = AdapterRegistry::from_value(config) else {
        return listener;
    };

    for name in registry.names() {
        match lookup.lookup(&matcher::service_name(name)) {
            Ok(adapter) => listener.attach(adapter),
            Err(err) => {
                tracing::debug!(adapter = name, error = %err, "skipping unresolvable adapter");
            }
        }
    }

    listener
}
