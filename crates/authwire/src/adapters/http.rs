//! HTTP Basic/Digest adapter
//!
//! Built from the `options` block of an adapter spec. Credential
//! verification covers Basic against an htpasswd-style file; Digest requests
//! are recognized for routing purposes but challenge handling belongs to the
//! serving layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::{AuthAdapter, AuthRequest, Identity};
use crate::error::ResolveError;

/// Options consumed by the HTTP adapter builder
#[derive(Debug, Clone, Deserialize)]
pub struct HttpOptions {
    /// Authentication realm reported to clients
    #[serde(default)]
    pub realm: Option<String>,
    /// Accepted Authorization schemes ("basic", "digest")
    #[serde(default)]
    pub accept_schemes: Vec<String>,
    /// Path to an htpasswd-style credential file (user:password per line)
    #[serde(default)]
    pub htpasswd: Option<PathBuf>,
}

/// HTTP Basic/Digest authentication adapter
pub struct HttpAdapter {
    name: String,
    realm: Option<String>,
    schemes: Vec<String>,
    credentials: HashMap<String, String>,
}

impl HttpAdapter {
    /// Build an HTTP adapter from a spec's `options` value
    pub fn from_options(name: &str, options: Option<&Value>) -> Result<Self, ResolveError> {
        let options: HttpOptions =
            serde_json::from_value(options.cloned().unwrap_or(Value::Null)).map_err(|source| {
                ResolveError::InvalidOptions {
                    name: name.to_string(),
                    source,
                }
            })?;

        let credentials = match &options.htpasswd {
            Some(path) => load_htpasswd(path)?,
            None => HashMap::new(),
        };

        Ok(Self {
            name: name.to_string(),
            realm: options.realm,
            schemes: options
                .accept_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
            credentials,
        })
    }

    /// Adapter name from configuration
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured realm
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    fn accepts(&self, scheme: &str) -> bool {
        self.schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

fn load_htpasswd(path: &Path) -> Result<HashMap<String, String>, ResolveError> {
    let text = std::fs::read_to_string(path).map_err(|source| ResolveError::Credentials {
        path: path.to_path_buf(),
        source,
    })?;

    let mut credentials = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((user, password)) = line.split_once(':') {
            credentials.insert(user.to_string(), password.to_string());
        }
    }

    Ok(credentials)
}

impl AuthAdapter for HttpAdapter {
    fn provides(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn can_handle(&self, request: &AuthRequest<'_>) -> bool {
        request
            .auth_scheme()
            .map(|scheme| self.accepts(scheme))
            .unwrap_or(false)
    }

    fn authenticate(&self, request: &AuthRequest<'_>) -> Option<Identity> {
        if !self.can_handle(request) {
            return None;
        }

        // Digest challenge handling lives in the serving layer
        let (user, password) = request.basic_credentials()?;

        match self.credentials.get(&user) {
            Some(expected) if *expected == password => {
                let mut identity = Identity::new(user, &self.name);
                if let Some(realm) = &self.realm {
                    identity = identity.with_attribute("realm", vec![realm.clone()]);
                }
                Some(identity)
            }
            _ => {
                tracing::debug!(adapter = %self.name, %user, "basic credentials rejected");
                None
            }
        }
    }
}
