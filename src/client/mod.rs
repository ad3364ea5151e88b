//! Blocking HTTP client for the introspection service.
//!
//! This module holds the version independent part of the client:
//!
//! - **Resolve the service URL** from an explicit URL, an endpoint catalog or a default
//! - **Negotiate the API version** against the range the service advertises
//! - **Dispatch requests** with the version header and error translation
//! - **Wait for introspection** of several nodes with a bounded poll loop
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── config       - ClientConfig and TransportConfig
//! ├── fetch        - InspectorClient and request dispatch
//! ├── negotiation  - version probe and validation
//! ├── transport    - Transport and EndpointCatalog seams, reqwest transport
//! ├── wait         - wait_for_finish poll loop
//! └── utils        - URL helpers
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`InspectorClient`] | Negotiated client bound to one service URL |
//! | [`ClientConfig`] | Construction options |
//! | [`Transport`] | Blocking HTTP seam |
//! | [`EndpointCatalog`] | Service catalog seam |
//!
//! # Examples
//!
//! ```ignore
//! use inspector_client::client::{ClientConfig, InspectorClient};
//!
//! let client = InspectorClient::new(ClientConfig::from_env())?;
//! let range = client.server_api_versions()?;
//! println!("server supports {}", range);
//! ```

mod config;
mod fetch;
mod negotiation;
mod transport;
mod utils;
mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{env, ClientConfig, TransportConfig, DEFAULT_URL};
pub use fetch::{probe_api_versions, InspectorClient};
pub use negotiation::{fetch_supported_range, negotiate, validate};
pub use transport::{EndpointCatalog, EndpointLookup, ReqwestTransport, StaticCatalog, Transport};
pub use utils::*;
pub use wait::{wait_for_finish, StatusPayload, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL};
