//! Adapter trait and request/identity types
//!
//! This module defines the contract every authentication adapter satisfies,
//! whether built from configuration or registered directly with the
//! surrounding service container.

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// Identity produced by a successful authentication
#[derive(Debug, Clone)]
pub struct Identity {
    /// Unique identifier (username, subject claim, token owner)
    pub subject: String,
    /// Name of the adapter that produced this identity
    pub adapter: String,
    /// Adapter-specific attributes (realm, groups, custom claims)
    pub attributes: HashMap<String, Vec<String>>,
}

impl Identity {
    /// Create a new identity
    pub fn new(subject: impl Into<String>, adapter: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            adapter: adapter.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.attributes.insert(key.into(), values);
        self
    }
}

/// Request context for authentication
#[derive(Debug)]
pub struct AuthRequest<'a> {
    /// HTTP method
    pub method: &'a str,
    /// Request path
    pub path: &'a str,
    /// HTTP headers
    pub headers: &'a http::HeaderMap,
}

impl<'a> AuthRequest<'a> {
    /// Create a new auth request
    pub fn new(method: &'a str, path: &'a str, headers: &'a http::HeaderMap) -> Self {
        Self {
            method,
            path,
            headers,
        }
    }

    /// Get Authorization header value
    pub fn authorization_header(&self) -> Option<&str> {
        self.headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
    }

    /// Authorization scheme token, e.g. "Basic", "Digest", "Bearer"
    pub fn auth_scheme(&self) -> Option<&str> {
        self.authorization_header()
            .and_then(|h| h.split_whitespace().next())
    }

    /// Check if request has Basic authentication
    pub fn has_basic_auth(&self) -> bool {
        self.auth_scheme()
            .map(|s| s.eq_ignore_ascii_case("basic"))
            .unwrap_or(false)
    }

    /// Check if request has Digest authentication
    pub fn has_digest_auth(&self) -> bool {
        self.auth_scheme()
            .map(|s| s.eq_ignore_ascii_case("digest"))
            .unwrap_or(false)
    }

    /// Check if request has Bearer token authentication
    pub fn has_bearer_auth(&self) -> bool {
        self.auth_scheme()
            .map(|s| s.eq_ignore_ascii_case("bearer"))
            .unwrap_or(false)
    }

    /// Extract Bearer token if present
    pub fn bearer_token(&self) -> Option<&str> {
        let (scheme, token) = self.authorization_header()?.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        Some(token.trim())
    }

    /// Decode Basic credentials into (user, password) if present
    pub fn basic_credentials(&self) -> Option<(String, String)> {
        let (scheme, encoded) = self.authorization_header()?.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = BASE64.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some((user.to_string(), password.to_string()))
    }
}

/// Trait for authentication adapters
///
/// Implemented by the built-in HTTP, OAuth2 and composite adapters as well as
/// any custom adapter registered with the service container under its own
/// name.
pub trait AuthAdapter: Send + Sync {
    /// Capability identifiers this adapter announces
    fn provides(&self) -> Vec<String>;

    /// Check if this adapter can handle the request
    /// (e.g., based on Authorization header scheme)
    fn can_handle(&self, request: &AuthRequest<'_>) -> bool;

    /// Authenticate the request; None when the request carries no
    /// credentials this adapter understands or they do not verify
    fn authenticate(&self, request: &AuthRequest<'_>) -> Option<Identity>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> http::HeaderMap {
        let mut headers = http::HeaderMap::new();
        headers.insert("authorization", value.parse().unwrap());
        headers
    }

    #[test]
    fn test_auth_scheme_detection() {
        let headers = headers("Basic dXNlcjpwYXNz");
        let request = AuthRequest::new("GET", "/", &headers);
        assert!(request.has_basic_auth());
        assert!(!request.has_digest_auth());
        assert!(!request.has_bearer_auth());
    }

    #[test]
    fn test_basic_credentials_decoding() {
        // "user:pass"
        let headers = headers("Basic dXNlcjpwYXNz");
        let request = AuthRequest::new("GET", "/", &headers);
        let (user, password) = request.basic_credentials().unwrap();
        assert_eq!(user, "user");
        assert_eq!(password, "pass");
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers("Bearer some-token");
        let request = AuthRequest::new("GET", "/", &headers);
        assert_eq!(request.bearer_token(), Some("some-token"));
        assert!(request.basic_credentials().is_none());
    }

    #[test]
    fn test_no_authorization_header() {
        let headers = http::HeaderMap::new();
        let request = AuthRequest::new("GET", "/", &headers);
        assert!(request.auth_scheme().is_none());
        assert!(!request.has_basic_auth());
    }

    #[test]
    fn test_identity_builder() {
        let identity = Identity::new("alice", "corp-http")
            .with_attribute("realm", vec!["api".to_string()]);
        assert_eq!(identity.subject, "alice");
        assert_eq!(identity.adapter, "corp-http");
        assert_eq!(identity.attributes["realm"], vec!["api"]);
    }
}
