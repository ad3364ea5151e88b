#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Inspector client: talking to the hardware introspection service
//!
//! The introspection service boots bare-metal nodes into a ramdisk, collects
//! their hardware inventory and stores it. This crate is a blocking HTTP
//! client for its REST API.
//!
//! ## Overview
//!
//! Every client goes through the same steps before its first request:
//!
//! 1. **URL resolution** - explicit URL, endpoint catalog, or the default `http://127.0.0.1:5050`
//! 2. **Version negotiation** - the service root advertises a minimum and maximum API version
//!    in response headers; the requested version must lie inside that range
//! 3. **Dispatch** - each request carries the negotiated version header, and error
//!    responses become [`RemoteError`] with the message extracted from the body
//!
//! ## Key Features
//!
//! - **Flexible version input**: `1`, `(1, 2)`, `"1.2"` and `[1, 2]` all mean a version
//! - **Legacy servers**: a `404` on the version probe means the service only knows `1.0`
//! - **Pluggable transport**: [`Transport`] and [`EndpointCatalog`] are traits; the
//!   default transport is a blocking reqwest client
//! - **Bounded waiting**: [`wait_for_finish`](client::wait_for_finish) polls several nodes
//!   with an injectable sleep
//! - **Typed v1 API**: introspection, stored data, per-interface LLDP views and rules
//!
//! ## Usage
//!
//! ```ignore
//! use inspector_client::v1::ClientV1;
//! use inspector_client::ClientConfig;
//!
//! let client = ClientV1::new(ClientConfig::from_env().with_api_version("1.3"))?;
//! client.introspect("node-1", None)?;
//! let statuses = client.wait_for_finish_default(&["node-1"])?;
//! if let Some(error) = &statuses["node-1"].error {
//!     eprintln!("introspection failed: {}", error);
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Versions, version ranges, responses and status payloads
//! - **[error]** - Error types and result handling
//! - **[client]** - URL resolution, negotiation, dispatch and the wait loop
//! - **[v1]** - Typed API v1 client
//! - **[protocol]** - Header names, header parsing and error body extraction

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;
pub mod v1;

pub use client::{
    ClientConfig, EndpointCatalog, InspectorClient, ReqwestTransport, StaticCatalog, Transport,
};
pub use error::{InspectorError, RemoteError, Result};
pub use types::{
    ApiVersion, HttpResponse, IntrospectionStatus, RequestOptions, VersionInput, VersionRange,
};
pub use v1::ClientV1;

/// Version requested when none is configured.
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion::new(1, 0);
