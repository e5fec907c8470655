//! OAuth2 bearer-token adapter
//!
//! Built from the `storage` block of an adapter spec. The storage adapter is
//! selected by a tagged discriminator; only the memory backend verifies
//! tokens in-process, the database backends construct and defer verification
//! to the out-of-scope storage engine.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::{AuthAdapter, AuthRequest, Identity};
use crate::error::ResolveError;

/// Token storage selection for the OAuth2 adapter
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "adapter", rename_all = "lowercase")]
pub enum StorageOptions {
    /// In-memory token map (token -> subject)
    Memory {
        #[serde(default)]
        tokens: HashMap<String, String>,
    },
    /// SQL-backed token storage
    Pdo {
        dsn: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
    /// MongoDB-backed token storage
    Mongo {
        dsn: String,
        #[serde(default)]
        database: Option<String>,
    },
}

/// OAuth2 bearer-token authentication adapter
pub struct OAuth2Adapter {
    name: String,
    storage: StorageOptions,
}

impl OAuth2Adapter {
    /// Build an OAuth2 adapter from a spec's `storage` value
    pub fn from_storage(name: &str, storage: Option<&Value>) -> Result<Self, ResolveError> {
        let storage: StorageOptions =
            serde_json::from_value(storage.cloned().unwrap_or(Value::Null)).map_err(|source| {
                ResolveError::InvalidOptions {
                    name: name.to_string(),
                    source,
                }
            })?;

        Ok(Self {
            name: name.to_string(),
            storage,
        })
    }

    /// Adapter name from configuration
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured storage backend
    pub fn storage(&self) -> &StorageOptions {
        &self.storage
    }
}

impl AuthAdapter for OAuth2Adapter {
    fn provides(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn can_handle(&self, request: &AuthRequest<'_>) -> bool {
        request.has_bearer_auth()
    }

    fn authenticate(&self, request: &AuthRequest<'_>) -> Option<Identity> {
        let token = request.bearer_token()?;

        match &self.storage {
            StorageOptions::Memory { tokens } => tokens
                .get(token)
                .map(|subject| Identity::new(subject, &self.name)),
            // Token introspection against external storage is the storage
            // engine's job
            StorageOptions::Pdo { .. } | StorageOptions::Mongo { .. } => None,
        }
    }
}
