//! Configuration model for adapter resolution
//!
//! Configuration arrives as an already-merged `serde_json::Value` tree with
//! the shape:
//!
//! ```json
//! {
//!   "authentication": {
//!     "adapters": {
//!       "<name>": {
//!         "adapter": "<kind-or-service-name>",
//!         "options": { ... },
//!         "storage": { ... },
//!         "adapters": ["<name>", ...]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Specs are created once at load time and never mutated.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Built-in kind selecting the HTTP Basic/Digest adapter
pub const KIND_HTTP: &str = "http";
/// Built-in kind selecting the OAuth2 bearer adapter
pub const KIND_OAUTH2: &str = "oauth2";
/// Built-in kind selecting the composite adapter
pub const KIND_COMPOSITE: &str = "composite";

/// A single adapter specification from configuration
///
/// Wraps the raw mapping so structurally invalid entries (missing or
/// non-string `adapter` kind) can still be inspected and reported.
#[derive(Debug, Clone)]
pub struct AdapterSpec(Map<String, Value>);

impl AdapterSpec {
    /// Build a spec from a raw configuration value; non-mappings are rejected
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|map| Self(map.clone()))
    }

    /// The `adapter` kind field; None when absent or not a string
    pub fn kind(&self) -> Option<&str> {
        self.0.get("adapter").and_then(Value::as_str)
    }

    /// Access a kind-specific field (`options`, `storage`, `adapters`)
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Discriminator parsed from a spec's `adapter` field
///
/// A closed set of built-in kinds plus a fallback naming an
/// externally-registered container service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind<'a> {
    Http,
    OAuth2,
    Composite,
    Service(&'a str),
}

impl<'a> AdapterKind<'a> {
    /// Parse a kind string
    pub fn from_name(kind: &'a str) -> Self {
        match kind {
            KIND_HTTP => Self::Http,
            KIND_OAUTH2 => Self::OAuth2,
            KIND_COMPOSITE => Self::Composite,
            other => Self::Service(other),
        }
    }
}

/// The full name-to-spec mapping sourced from configuration
///
/// Read-only once built; iteration order is the sorted adapter name order so
/// attachment passes are deterministic.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    entries: BTreeMap<String, AdapterSpec>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the component's configuration subtree
    ///
    /// Navigates `authentication.adapters`; returns None when that subtree is
    /// absent or not a mapping. Entries whose value is not a mapping are
    /// skipped (they carry no usable spec).
    pub fn from_value(config: &Value) -> Option<Self> {
        let adapters = config.get("authentication")?.get("adapters")?.as_object()?;

        let entries = adapters
            .iter()
            .filter_map(|(name, value)| {
                AdapterSpec::from_value(value).map(|spec| (name.clone(), spec))
            })
            .collect();

        Some(Self { entries })
    }

    /// Insert a spec under a name
    pub fn insert(&mut self, name: impl Into<String>, spec: AdapterSpec) {
        self.entries.insert(name.into(), spec);
    }

    /// Look up the spec for an adapter name
    pub fn get(&self, name: &str) -> Option<&AdapterSpec> {
        self.entries.get(name)
    }

    /// Iterate configured adapter names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of configured adapters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no adapters are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_from_config_tree() {
        let config = json!({
            "authentication": {
                "adapters": {
                    "corp": { "adapter": "http", "options": { "realm": "api" } },
                    "tokens": { "adapter": "oauth2", "storage": { "adapter": "memory" } },
                }
            }
        });

        let registry = AdapterRegistry::from_value(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("corp").unwrap().kind(), Some("http"));
        assert_eq!(registry.get("tokens").unwrap().kind(), Some("oauth2"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_absent_subtree() {
        assert!(AdapterRegistry::from_value(&json!({})).is_none());
        assert!(AdapterRegistry::from_value(&json!({ "authentication": {} })).is_none());
        assert!(
            AdapterRegistry::from_value(&json!({ "authentication": { "adapters": "nope" } }))
                .is_none()
        );
    }

    #[test]
    fn test_registry_skips_non_mapping_entries() {
        let config = json!({
            "authentication": {
                "adapters": {
                    "good": { "adapter": "http" },
                    "bad": "not a mapping",
                }
            }
        });

        let registry = AdapterRegistry::from_value(&config).unwrap();
        assert!(registry.get("good").is_some());
        assert!(registry.get("bad").is_none());
    }

    #[test]
    fn test_spec_kind_accessor() {
        let spec = AdapterSpec::from_value(&json!({ "adapter": "composite" })).unwrap();
        assert_eq!(spec.kind(), Some("composite"));

        let missing = AdapterSpec::from_value(&json!({})).unwrap();
        assert_eq!(missing.kind(), None);

        let non_string = AdapterSpec::from_value(&json!({ "adapter": 42 })).unwrap();
        assert_eq!(non_string.kind(), None);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(AdapterKind::from_name("http"), AdapterKind::Http);
        assert_eq!(AdapterKind::from_name("oauth2"), AdapterKind::OAuth2);
        assert_eq!(AdapterKind::from_name("composite"), AdapterKind::Composite);
        assert_eq!(
            AdapterKind::from_name("CustomService"),
            AdapterKind::Service("CustomService")
        );
    }

    #[test]
    fn test_names_sorted() {
        let config = json!({
            "authentication": {
                "adapters": {
                    "zeta": { "adapter": "http" },
                    "alpha": { "adapter": "http" },
                }
            }
        });

        let registry = AdapterRegistry::from_value(&config).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
