//! Built-in authentication adapters

pub mod composite;
pub mod http;
pub mod oauth2;

pub use composite::CompositeAdapter;
pub use http::{HttpAdapter, HttpOptions};
pub use oauth2::{OAuth2Adapter, StorageOptions};
