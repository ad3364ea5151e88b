//! Base HTTP client: URL resolution, version negotiation and request dispatch.
//!
//! # Construction
//!
//! 1. Resolve the service URL: the explicit URL, else the endpoint catalog,
//!    else the configured default URL. A catalog miss degrades to the
//!    default with a warning unless `fallback_to_default_url` is off.
//! 2. Strip trailing slashes and negotiate the API version against that
//!    unversioned root.
//! 3. Append `/v<major>` unless the URL already ends with it.
//!
//! Any failure aborts construction; no half-built client is returned.
//!
//! # Examples
//!
//! ```ignore
//! use inspector_client::{ClientConfig, InspectorClient, RequestOptions};
//! use http::Method;
//!
//! let client = InspectorClient::new(ClientConfig::default().with_url("http://10.0.0.2:5050"))?;
//! println!("negotiated {} at {}", client.api_version(), client.base_url());
//! let response = client.request(Method::GET, "/introspection", RequestOptions::new())?;
//! ```

use crate::client::config::ClientConfig;
use crate::client::negotiation::{fetch_supported_range, negotiate};
use crate::client::transport::{EndpointCatalog, EndpointLookup, ReqwestTransport, Transport};
use crate::client::utils::{join_url, strip_trailing_slashes, with_version_suffix};
use crate::error::{InspectorError, RemoteError, Result};
use crate::protocol::{format_version_header, names};
use crate::types::{ApiVersion, HttpResponse, OutgoingRequest, RequestOptions, VersionRange};
use http::{HeaderValue, Method};
use std::fmt;
use std::sync::Arc;

/// Client bound to one service URL and one negotiated API version.
///
/// The version is fixed for the client's lifetime; build a new client to
/// renegotiate. Cloning is cheap and shares the transport.
#[derive(Clone)]
pub struct InspectorClient {
    transport: Arc<dyn Transport>,
    root_url: String,
    base_url: String,
    api_version: ApiVersion,
    auth_header: Option<HeaderValue>,
}

impl InspectorClient {
    /// Create a client using the reqwest transport described by `config.transport`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config.transport)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on a caller supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::build(config, transport, None)
    }

    /// Create a client that looks its URL up in `catalog` when no explicit URL is set.
    pub fn with_catalog(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        catalog: &dyn EndpointCatalog,
    ) -> Result<Self> {
        Self::build(config, transport, Some(catalog))
    }

    fn build(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        catalog: Option<&dyn EndpointCatalog>,
    ) -> Result<Self> {
        let auth_header = match &config.auth_token {
            Some(token) => {
                if catalog.is_none() {
                    tracing::warn!(
                        "Passing auth_token to client objects is deprecated, \
                         please use an authenticated transport instead"
                    );
                }
                Some(auth_header_value(token)?)
            }
            None => None,
        };

        let root_url = resolve_root_url(&config, catalog)?;
        let api_version = negotiate(transport.as_ref(), &root_url, config.api_version.clone())?;
        let base_url = with_version_suffix(&root_url, api_version.major);

        tracing::debug!(
            url = %base_url,
            api_version = %api_version,
            "Inspector client ready"
        );

        Ok(InspectorClient {
            transport,
            root_url,
            base_url,
            api_version,
            auth_header,
        })
    }

    /// Negotiated API version.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Versioned base URL, ending in `/v<major>`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Unversioned service root used for version probes.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Issue a request relative to the base URL.
    ///
    /// Adds the API version header and, when a bare token was configured,
    /// the auth header. Responses with status >= 400 become
    /// [`InspectorError::Remote`]; transport failures pass through.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let url = join_url(&self.base_url, path);
        let RequestOptions {
            mut headers,
            query,
            json,
        } = options;

        headers.insert(names::VERSION, format_version_header(&self.api_version)?);
        if let Some(auth) = &self.auth_header {
            headers.insert(names::AUTH_TOKEN, auth.clone());
        }

        tracing::debug!(
            method = %method,
            url = %url,
            api_version = %self.api_version,
            query = ?query,
            "Requesting"
        );

        let response = self.transport.request(OutgoingRequest {
            method: method.clone(),
            url: url.clone(),
            headers,
            query,
            json,
        })?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = response.status,
            "Got response"
        );

        RemoteError::raise_if_needed(response)
    }

    /// `GET` without options.
    pub fn get(&self, path: &str) -> Result<HttpResponse> {
        self.request(Method::GET, path, RequestOptions::new())
    }

    /// `POST` with options.
    pub fn post(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::POST, path, options)
    }

    /// `DELETE` without options.
    pub fn delete(&self, path: &str) -> Result<HttpResponse> {
        self.request(Method::DELETE, path, RequestOptions::new())
    }

    /// Fetch the version range the service currently advertises.
    pub fn server_api_versions(&self) -> Result<VersionRange> {
        fetch_supported_range(self.transport.as_ref(), &self.root_url)
    }
}

impl fmt::Debug for InspectorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("authenticated", &self.auth_header.is_some())
            .finish()
    }
}

/// Probe the version range without negotiating a client.
///
/// Resolves the service URL exactly as client construction does.
pub fn probe_api_versions(
    config: &ClientConfig,
    transport: &dyn Transport,
    catalog: Option<&dyn EndpointCatalog>,
) -> Result<VersionRange> {
    let root_url = resolve_root_url(config, catalog)?;
    fetch_supported_range(transport, &root_url)
}

fn auth_header_value(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token).map_err(|_| {
        InspectorError::InvalidArgument("auth token is not a valid header value".into())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Resolve the unversioned service root.
///
/// Candidates are tried in order and the first URL found wins; the default
/// URL terminates the chain.
fn resolve_root_url(
    config: &ClientConfig,
    catalog: Option<&dyn EndpointCatalog>,
) -> Result<String> {
    let explicit = || -> Result<Option<String>> {
        Ok(config.inspector_url.clone().filter(|url| !url.is_empty()))
    };
    let from_catalog = || -> Result<Option<String>> {
        match catalog {
            Some(catalog) => lookup_endpoint(config, catalog),
            None => Ok(None),
        }
    };
    let candidates: [&dyn Fn() -> Result<Option<String>>; 2] = [&explicit, &from_catalog];

    let mut resolved = None;
    for candidate in candidates {
        if let Some(url) = candidate()? {
            resolved = Some(url);
            break;
        }
    }
    let resolved = resolved.unwrap_or_else(|| config.default_url.clone());

    let root_url = strip_trailing_slashes(&resolved).to_string();
    url::Url::parse(&root_url)?;
    Ok(root_url)
}

fn lookup_endpoint(config: &ClientConfig, catalog: &dyn EndpointCatalog) -> Result<Option<String>> {
    let lookup = EndpointLookup {
        service_type: config.service_type.clone(),
        interface: config.interface.clone(),
        region_name: config.region_name.clone(),
    };

    match catalog.get_endpoint(&lookup) {
        Ok(Some(url)) if !url.is_empty() => Ok(Some(url)),
        Ok(_) | Err(InspectorError::EndpointNotFound { .. }) => {
            if !config.fallback_to_default_url {
                return Err(InspectorError::EndpointNotFound {
                    service_type: config.service_type.clone(),
                });
            }
            tracing::warn!(
                service_type = %config.service_type,
                default_url = %config.default_url,
                "Endpoint for service was not found, falling back to the default URL"
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
