//! Configuration for the inspector client.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `api_version` | `1.0` | Minimum API version the server must support |
//! | `inspector_url` | none | Explicit service URL, bypasses the catalog |
//! | `auth_token` | none | Bare token sent as `X-Auth-Token` (deprecated) |
//! | `service_type` | `baremetal-introspection` | Catalog lookup key |
//! | `interface` | none | Catalog interface (public, internal, ...) |
//! | `region_name` | none | Catalog region |
//! | `default_url` | `http://127.0.0.1:5050` | Last resort URL |
//! | `fallback_to_default_url` | `true` | Use `default_url` when the catalog has no entry |
//! | `transport` | see [`TransportConfig`] | HTTP transport tuning |
//!
//! # Examples
//!
//! ```
//! use inspector_client::client::ClientConfig;
//! use inspector_client::VersionInput;
//!
//! let config = ClientConfig::default()
//!     .with_url("http://10.0.0.2:5050")
//!     .with_api_version("1.2");
//! assert_eq!(config.api_version, VersionInput::Text("1.2".into()));
//! assert_eq!(config.service_type, "baremetal-introspection");
//! ```
//!
//! Configs also deserialize, with every field optional:
//!
//! ```
//! use inspector_client::client::ClientConfig;
//!
//! let raw = r#"{"inspector_url": "http://h:5050", "api_version": [1, 3]}"#;
//! let config: ClientConfig = serde_json::from_str(raw).unwrap();
//! assert_eq!(config.inspector_url.as_deref(), Some("http://h:5050"));
//! ```

use crate::protocol::{DEFAULT_PORT, DEFAULT_SERVICE_TYPE};
use crate::types::VersionInput;
use serde::Deserialize;

/// URL used when neither an explicit URL nor a catalog entry is available.
pub const DEFAULT_URL: &str = "http://127.0.0.1:5050";

/// Environment variables read by [`ClientConfig::from_env`].
pub mod env {
    /// Explicit service URL.
    pub const URL: &str = "INSPECTOR_URL";
    /// Requested API version.
    pub const API_VERSION: &str = "INSPECTOR_API_VERSION";
    /// Bare auth token.
    pub const AUTH_TOKEN: &str = "INSPECTOR_AUTH_TOKEN";
    /// Catalog interface.
    pub const INTERFACE: &str = "INSPECTOR_INTERFACE";
    /// Catalog region.
    pub const REGION: &str = "INSPECTOR_REGION";
}

/// Tuning for the default reqwest based transport.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Proxy for all requests, empty for none.
    pub proxy_url: String,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            request_timeout_ms: 60_000,
            proxy_url: String::new(),
            pool_max_idle_per_host: 10,
        }
    }
}

/// Settings used to construct an [`InspectorClient`](crate::InspectorClient).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Minimum API version the server must support.
    pub api_version: VersionInput,
    /// Explicit service URL in the form `http://host:port[/vN]`.
    pub inspector_url: Option<String>,
    /// Bare authentication token. Deprecated in favour of a catalog/session.
    pub auth_token: Option<String>,
    /// Service type for catalog lookups.
    pub service_type: String,
    /// Interface for catalog lookups.
    pub interface: Option<String>,
    /// Region for catalog lookups.
    pub region_name: Option<String>,
    /// Last resort URL.
    pub default_url: String,
    /// Whether a catalog miss degrades to `default_url` instead of failing.
    pub fallback_to_default_url: bool,
    /// Transport tuning.
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_version: VersionInput::default(),
            inspector_url: None,
            auth_token: None,
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            interface: None,
            region_name: None,
            default_url: DEFAULT_URL.to_string(),
            fallback_to_default_url: true,
            transport: TransportConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `INSPECTOR_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`, keyed by the [`env`] names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(url) = non_empty(env::URL) {
            config.inspector_url = Some(url);
        }
        if let Some(version) = non_empty(env::API_VERSION) {
            config.api_version = VersionInput::Text(version);
        }
        if let Some(token) = non_empty(env::AUTH_TOKEN) {
            config.auth_token = Some(token);
        }
        if let Some(interface) = non_empty(env::INTERFACE) {
            config.interface = Some(interface);
        }
        if let Some(region) = non_empty(env::REGION) {
            config.region_name = Some(region);
        }
        config
    }

    /// Default URL for a given host, on the standard port.
    pub fn local_url(host: &str) -> String {
        format!("http://{}:{}", host, DEFAULT_PORT)
    }

    /// Set the requested API version.
    pub fn with_api_version(mut self, version: impl Into<VersionInput>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set an explicit service URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.inspector_url = Some(url.into());
        self
    }

    /// Set a bare auth token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the catalog service type.
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Set the catalog interface.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Set the catalog region.
    pub fn with_region_name(mut self, region: impl Into<String>) -> Self {
        self.region_name = Some(region.into());
        self
    }

    /// Set the last resort URL.
    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    /// Choose whether a catalog miss falls back to the default URL.
    pub fn with_fallback_to_default_url(mut self, fallback: bool) -> Self {
        self.fallback_to_default_url = fallback;
        self
    }

    /// Set transport tuning.
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.default_url, "http://127.0.0.1:5050");
        assert!(config.fallback_to_default_url);
        assert!(config.inspector_url.is_none());
        assert_eq!(config.transport.request_timeout_ms, 60_000);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (env::URL, "http://inspector:5050"),
            (env::API_VERSION, "1.6"),
            (env::REGION, "RegionTwo"),
            (env::AUTH_TOKEN, ""),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.inspector_url.as_deref(), Some("http://inspector:5050"));
        assert_eq!(config.api_version, VersionInput::Text("1.6".into()));
        assert_eq!(config.region_name.as_deref(), Some("RegionTwo"));
        assert!(config.auth_token.is_none());
        assert!(config.interface.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"api_version": 1, "fallback_to_default_url": false,
                "transport": {"request_timeout_ms": 500}}"#,
        )
        .unwrap();
        assert_eq!(config.api_version, VersionInput::Int(1));
        assert!(!config.fallback_to_default_url);
        assert_eq!(config.transport.request_timeout_ms, 500);
        assert_eq!(config.transport.pool_max_idle_per_host, 10);
        assert_eq!(config.service_type, DEFAULT_SERVICE_TYPE);
    }

    #[test]
    fn test_local_url() {
        assert_eq!(ClientConfig::local_url("10.1.2.3"), "http://10.1.2.3:5050");
    }
}
