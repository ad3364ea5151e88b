//! Capabilities the client consumes: an HTTP transport and an endpoint catalog.
//!
//! [`Transport`] is the seam between the negotiation/dispatch logic and the
//! network. [`ReqwestTransport`] is the production implementation; tests
//! substitute scripted fakes.

use crate::client::config::TransportConfig;
use crate::error::{InspectorError, Result};
use crate::types::{HttpResponse, OutgoingRequest};
use std::time::Duration;

/// Blocking HTTP transport.
///
/// Implementations return every response, whatever its status; classifying
/// errors is the caller's job. Connectivity failures are returned as
/// [`InspectorError::Transport`].
pub trait Transport: Send + Sync {
    /// Unauthenticated GET, used for the version probe.
    fn get(&self, url: &str) -> Result<HttpResponse>;

    /// General request.
    fn request(&self, request: OutgoingRequest) -> Result<HttpResponse>;
}

/// Parameters of a service catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointLookup {
    /// Service type, e.g. `baremetal-introspection`
    pub service_type: String,
    /// Interface (public, internal, admin)
    pub interface: Option<String>,
    /// Region name
    pub region_name: Option<String>,
}

/// A service catalog able to resolve the service URL.
///
/// Return `Ok(None)` or [`InspectorError::EndpointNotFound`] when the catalog
/// has no entry; any other error is treated as a real failure.
pub trait EndpointCatalog {
    /// Resolve the endpoint URL.
    fn get_endpoint(&self, lookup: &EndpointLookup) -> Result<Option<String>>;
}

/// A catalog that always knows the same URL.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    url: Option<String>,
}

impl StaticCatalog {
    /// Catalog resolving to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        StaticCatalog {
            url: Some(url.into()),
        }
    }

    /// Catalog with no entries.
    pub fn empty() -> Self {
        StaticCatalog { url: None }
    }
}

impl EndpointCatalog for StaticCatalog {
    fn get_endpoint(&self, lookup: &EndpointLookup) -> Result<Option<String>> {
        match &self.url {
            Some(url) => Ok(Some(url.clone())),
            None => Err(InspectorError::EndpointNotFound {
                service_type: lookup.service_type.clone(),
            }),
        }
    }
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Transport with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    /// Transport with custom settings.
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if !config.proxy_url.is_empty() {
            builder = builder.proxy(reqwest::Proxy::all(config.proxy_url.as_str())?);
        }

        Ok(ReqwestTransport {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        ReqwestTransport { client }
    }

    fn convert(response: reqwest::blocking::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        Ok(HttpResponse::new(status, headers, body))
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        Self::convert(self.client.get(url).send()?)
    }

    fn request(&self, request: OutgoingRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        Self::convert(builder.send()?)
    }
}
