//! Resolution error types

use std::path::PathBuf;

use thiserror::Error;

use crate::container::ContainerError;

/// Errors raised while resolving an adapter from configuration
///
/// Structural configuration problems are reported here; failures coming out
/// of the service container pass through unchanged via [`ResolveError::Container`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to resolve \"{service}\": no adapter configuration found")]
    MissingSpec { service: String },

    #[error("unable to resolve \"{service}\": adapter kind is missing or not a string")]
    InvalidKind { service: String },

    #[error("No adapters configured")]
    NoAdaptersConfigured,

    #[error("cyclic adapter reference while resolving \"{service}\"")]
    CyclicReference { service: String },

    #[error("invalid options for adapter \"{name}\": {source}")]
    InvalidOptions {
        name: String,
        source: serde_json::Error,
    },

    #[error("failed to load credentials from {}: {source}", path.display())]
    Credentials {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Container(#[from] ContainerError),
}
