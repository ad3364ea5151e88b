//! Header names and header value parsing for the introspection API.
//!
//! # Header Formats
//!
//! | Header | Direction | Example |
//! |--------|-----------|---------|
//! | `X-OpenStack-Ironic-Inspector-API-Version` | request | `1.0` |
//! | `X-OpenStack-Ironic-Inspector-API-Minimum-Version` | probe response | `1.0` |
//! | `X-OpenStack-Ironic-Inspector-API-Maximum-Version` | probe response | `1.13` |
//! | `X-Auth-Token` | request | opaque token |
//!
//! Probe response headers default to `1.0` when absent; servers that
//! predate version negotiation send neither.
//!
//! # Examples
//!
//! ```
//! use inspector_client::protocol::{parse_version_header, format_version_header};
//! use inspector_client::ApiVersion;
//!
//! let version = parse_version_header(Some("1.42")).unwrap();
//! assert_eq!(version, ApiVersion::new(1, 42));
//! assert_eq!(parse_version_header(None).unwrap(), ApiVersion::new(1, 0));
//! assert_eq!(format_version_header(&version).unwrap(), "1.42");
//! ```

use crate::error::{InspectorError, Result};
use crate::types::{ApiVersion, VersionRange};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Header names used by the service.
///
/// Names are lowercase, which is how `http` stores them; lookups in a
/// [`HeaderMap`] are case-insensitive either way.
pub mod names {
    use http::HeaderName;

    /// Requested API version, sent on every dispatched request.
    pub const VERSION: HeaderName =
        HeaderName::from_static("x-openstack-ironic-inspector-api-version");
    /// Minimum supported version, returned by the service root.
    pub const MIN_VERSION: HeaderName =
        HeaderName::from_static("x-openstack-ironic-inspector-api-minimum-version");
    /// Maximum supported version, returned by the service root.
    pub const MAX_VERSION: HeaderName =
        HeaderName::from_static("x-openstack-ironic-inspector-api-maximum-version");
    /// Bare authentication token.
    pub const AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
}

/// Version assumed when a probe header is missing.
pub const DEFAULT_HEADER_VERSION: &str = "1.0";

/// Parse a version header value, defaulting to `1.0` when absent.
///
/// # Errors
///
/// [`InspectorError::MalformedVersion`] if the header is present but not `X` or `X.Y`.
pub fn parse_version_header(value: Option<&str>) -> Result<ApiVersion> {
    ApiVersion::parse(value.unwrap_or(DEFAULT_HEADER_VERSION).trim())
}

/// Format a version as a request header value.
///
/// # Errors
///
/// [`InspectorError::MalformedVersion`] if the formatted version is not a
/// valid header value.
pub fn format_version_header(version: &ApiVersion) -> Result<HeaderValue> {
    let formatted = version.to_string();
    HeaderValue::from_str(&formatted).map_err(|_| {
        InspectorError::MalformedVersion(format!("cannot send {:?} as a header value", formatted))
    })
}

/// Read the advertised version range from probe response headers.
///
/// Each bound defaults independently to `1.0`.
pub fn parse_version_range(headers: &HeaderMap) -> Result<VersionRange> {
    let read = |name: &HeaderName| -> Result<ApiVersion> {
        let raw = match headers.get(name) {
            Some(value) => Some(value.to_str().map_err(|_| {
                InspectorError::MalformedVersion(format!("non-ASCII value in {} header", name))
            })?),
            None => None,
        };
        parse_version_header(raw)
    };

    Ok(VersionRange::new(
        read(&names::MIN_VERSION)?,
        read(&names::MAX_VERSION)?,
    ))
}
