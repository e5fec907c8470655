//! Service-name matching
//!
//! Adapters are addressed by service names following the fixed convention
//! `auth-adapters-<name>` where `<name>` is one or more word characters.
//! [`can_resolve`] is a pure predicate over a requested name: it reports
//! whether a usable adapter specification exists without constructing
//! anything, so the surrounding container can probe cheaply before committing
//! to full resolution.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::{AdapterKind, AdapterRegistry};
use crate::container::ServiceContainer;

/// Prefix of every resolvable adapter service name
pub const SERVICE_PREFIX: &str = "auth-adapters-";

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^auth-adapters-(?P<name>\w+)$").expect("valid pattern"))
}

/// Extract the adapter name from a service name
///
/// Returns None when the service name does not follow the convention.
pub fn adapter_name(service_name: &str) -> Option<&str> {
    name_pattern()
        .captures(service_name)
        .and_then(|captures| captures.name("name"))
        .map(|m| m.as_str())
}

/// Build the service name for an adapter name
pub fn service_name(adapter_name: &str) -> String {
    format!("{SERVICE_PREFIX}{adapter_name}")
}

/// Check whether a requested service name can be resolved to an adapter
///
/// Yields false when:
/// - the name does not match the naming convention (the registry is not
///   consulted in that case);
/// - the registry has no entry for the extracted adapter name;
/// - the entry's kind field is absent or not a string;
/// - the kind names a container service that does not satisfy the adapter
///   contract (the container is consulted before the built-in kinds, so a
///   registered service shadows a built-in name here);
/// - the kind is neither a registered service nor a built-in kind.
pub fn can_resolve(
    service_name: &str,
    registry: &AdapterRegistry,
    container: &dyn ServiceContainer,
) -> bool {
    let Some(name) = adapter_name(service_name) else {
        return false;
    };
    let Some(spec) = registry.get(name) else {
        return false;
    };
    let Some(kind) = spec.kind() else {
        return false;
    };

    if container.contains(kind) {
        return container.provides_adapter(kind);
    }

    matches!(
        AdapterKind::from_name(kind),
        AdapterKind::Http | AdapterKind::OAuth2 | AdapterKind::Composite
    )
}
