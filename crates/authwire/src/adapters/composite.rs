//! Composite adapter
//!
//! Aggregates several named adapters under one identity. Constituents are
//! resolved through the root lookup so a shared cache sees them, and a
//! constituent may itself be a composite.

use std::sync::Arc;

use crate::adapter::{AuthAdapter, AuthRequest, Identity};
use crate::config::AdapterSpec;
use crate::error::ResolveError;
use crate::matcher;
use crate::resolver::AdapterLookup;

/// Adapter aggregating several named adapters
pub struct CompositeAdapter {
    name: String,
    adapters: Vec<Arc<dyn AuthAdapter>>,
    provides: Vec<String>,
}

impl CompositeAdapter {
    /// Build a composite from a spec's `adapters` list
    ///
    /// Fails with [`ResolveError::NoAdaptersConfigured`] unless the list is a
    /// non-empty array of adapter names. Each referenced name is resolved
    /// through `lookup` under its full service name; resolution failures
    /// propagate unchanged.
    pub fn from_spec(
        name: &str,
        spec: &AdapterSpec,
        lookup: &dyn AdapterLookup,
    ) -> Result<Self, ResolveError> {
        let referenced = spec
            .field("adapters")
            .and_then(|value| value.as_array())
            .filter(|list| !list.is_empty())
            .ok_or(ResolveError::NoAdaptersConfigured)?;

        let mut adapters = Vec::with_capacity(referenced.len());
        for entry in referenced {
            let referenced_name = entry.as_str().ok_or(ResolveError::NoAdaptersConfigured)?;
            let adapter = lookup.lookup(&matcher::service_name(referenced_name))?;
            adapters.push(adapter);
        }

        // Concatenation in encounter order, own name last. Duplicate
        // identifiers across constituents are preserved.
        let mut provides: Vec<String> = adapters
            .iter()
            .flat_map(|adapter| adapter.provides())
            .collect();
        provides.push(name.to_string());

        Ok(Self {
            name: name.to_string(),
            adapters,
            provides,
        })
    }

    /// The composite's own declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constituent adapters in configuration order
    pub fn adapters(&self) -> &[Arc<dyn AuthAdapter>] {
        &self.adapters
    }
}

impl AuthAdapter for CompositeAdapter {
    fn provides(&self) -> Vec<String> {
        self.provides.clone()
    }

    fn can_handle(&self, request: &AuthRequest<'_>) -> bool {
        self.adapters.iter().any(|a| a.can_handle(request))
    }

    fn authenticate(&self, request: &AuthRequest<'_>) -> Option<Identity> {
        // First constituent that can handle the request wins
        self.adapters
            .iter()
            .find(|a| a.can_handle(request))
            .and_then(|a| a.authenticate(request))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use parking_lot::RwLock;
    use serde_json::json;

    use super::*;

    struct NamedAdapter {
        name: String,
        handles: bool,
    }

    impl NamedAdapter {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                handles: false,
            }
        }

        fn handling(name: &str) -> Self {
            Self {
                name: name.to_string(),
                handles: true,
            }
        }
    }

    impl AuthAdapter for NamedAdapter {
        fn provides(&self) -> Vec<String> {
            vec![self.name.clone()]
        }

        fn can_handle(&self, _request: &AuthRequest<'_>) -> bool {
            self.handles
        }

        fn authenticate(&self, _request: &AuthRequest<'_>) -> Option<Identity> {
            self.handles.then(|| Identity::new("subject", &self.name))
        }
    }

    #[derive(Default)]
    struct MapLookup {
        adapters: RwLock<HashMap<String, Arc<dyn AuthAdapter>>>,
    }

    impl MapLookup {
        fn with(adapters: Vec<(&str, Arc<dyn AuthAdapter>)>) -> Self {
            let lookup = Self::default();
            for (name, adapter) in adapters {
                lookup
                    .adapters
                    .write()
                    .insert(matcher::service_name(name), adapter);
            }
            lookup
        }
    }

    impl AdapterLookup for MapLookup {
        fn lookup(&self, service_name: &str) -> Result<Arc<dyn AuthAdapter>, ResolveError> {
            self.adapters
                .read()
                .get(service_name)
                .cloned()
                .ok_or_else(|| ResolveError::MissingSpec {
                    service: service_name.to_string(),
                })
        }
    }

    fn spec(value: serde_json::Value) -> AdapterSpec {
        AdapterSpec::from_value(&value).unwrap()
    }

    #[test]
    fn test_provides_order() {
        let lookup = MapLookup::with(vec![
            ("foo", Arc::new(NamedAdapter::new("foo")) as Arc<dyn AuthAdapter>),
            ("bar", Arc::new(NamedAdapter::new("bar")) as Arc<dyn AuthAdapter>),
        ]);

        let composite =
            CompositeAdapter::from_spec("foobar", &spec(json!({ "adapters": ["foo", "bar"] })), &lookup)
                .unwrap();

        assert_eq!(composite.provides(), vec!["foo", "bar", "foobar"]);
        assert_eq!(composite.adapters().len(), 2);
    }

    #[test]
    fn test_duplicate_capabilities_preserved() {
        let lookup = MapLookup::with(vec![
            ("foo", Arc::new(NamedAdapter::new("shared")) as Arc<dyn AuthAdapter>),
            ("bar", Arc::new(NamedAdapter::new("shared")) as Arc<dyn AuthAdapter>),
        ]);

        let composite =
            CompositeAdapter::from_spec("both", &spec(json!({ "adapters": ["foo", "bar"] })), &lookup)
                .unwrap();

        assert_eq!(composite.provides(), vec!["shared", "shared", "both"]);
    }

    #[test]
    fn test_invalid_adapters_values() {
        let lookup = MapLookup::default();
        let invalid = [
            json!({}),
            json!({ "adapters": null }),
            json!({ "adapters": true }),
            json!({ "adapters": 1 }),
            json!({ "adapters": 1.1 }),
            json!({ "adapters": "options" }),
            json!({ "adapters": { "storage": true } }),
            json!({ "adapters": [] }),
        ];

        for value in invalid {
            let err = CompositeAdapter::from_spec("foo", &spec(value), &lookup).err().unwrap();
            assert_eq!(err.to_string(), "No adapters configured");
        }
    }

    #[test]
    fn test_constituent_failure_propagates() {
        let lookup = MapLookup::default();
        let err =
            CompositeAdapter::from_spec("foo", &spec(json!({ "adapters": ["ghost"] })), &lookup)
                .err().unwrap();
        assert!(matches!(err, ResolveError::MissingSpec { .. }));
    }

    #[test]
    fn test_first_match_wins() {
        let lookup = MapLookup::with(vec![
            ("silent", Arc::new(NamedAdapter::new("silent")) as Arc<dyn AuthAdapter>),
            ("active", Arc::new(NamedAdapter::handling("active")) as Arc<dyn AuthAdapter>),
        ]);

        let composite = CompositeAdapter::from_spec(
            "combo",
            &spec(json!({ "adapters": ["silent", "active"] })),
            &lookup,
        )
        .unwrap();

        let headers = http::HeaderMap::new();
        let request = AuthRequest::new("GET", "/", &headers);

        assert!(composite.can_handle(&request));
        let identity = composite.authenticate(&request).unwrap();
        assert_eq!(identity.adapter, "active");
    }
}
