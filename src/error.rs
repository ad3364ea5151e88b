//! Error types for inspector client operations.
//!
//! This module defines every error the client can return. The [`Result`] type
//! alias provides a convenient shorthand for fallible operations.
//!
//! # Error Categories
//!
//! | Category | Variants | Source |
//! |----------|----------|--------|
//! | Version | `MalformedVersion`, `VersionTypeMismatch`, `VersionNotSupported` | Caller / server |
//! | Server | `Remote` | HTTP status >= 400 |
//! | Discovery | `EndpointNotFound`, `InvalidUrl` | Configuration |
//! | Polling | `WaitTimeout` | Retry budget exhausted |
//! | Input | `InvalidArgument`, `MissingArgument`, `InterfaceNotFound` | Caller |
//! | Transport | `Transport`, `Json` | Connectivity / decoding |
//!
//! Nothing here is retried automatically. Transport failures are passed
//! through untouched so callers can downcast to the underlying error.
//!
//! # Examples
//!
//! ```
//! use inspector_client::{ApiVersion, InspectorError};
//!
//! let err = ApiVersion::parse("a.b").unwrap_err();
//! assert!(matches!(err, InspectorError::MalformedVersion(_)));
//! assert!(err.to_string().contains("a.b"));
//! ```

use crate::protocol::extract_error_message;
use crate::types::{ApiVersion, HttpResponse, VersionRange};
use bytes::Bytes;
use http::HeaderMap;
use thiserror::Error;

/// Result type for inspector client operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Errors that can occur while talking to the introspection service.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InspectorError {
    /// A version string or sequence could not be parsed into two integer components.
    #[error("Malformed API version: {0}")]
    MalformedVersion(String),

    /// A version sequence contained a component that is not a non-negative integer.
    #[error("All API version components should be integers, got {0}")]
    VersionTypeMismatch(String),

    /// The requested version lies outside the range advertised by the server.
    #[error("Version {expected} is not supported by the server, supported range is {supported}")]
    VersionNotSupported {
        /// Version the caller asked for.
        expected: ApiVersion,
        /// Range the server reported.
        supported: VersionRange,
    },

    /// The server answered with HTTP status >= 400.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The endpoint catalog had no URL for the service and no fallback applies.
    #[error("Endpoint for service {service_type} was not found")]
    EndpointNotFound {
        /// Service type used for the lookup.
        service_type: String,
    },

    /// Waiting for targets ran out of retries.
    #[error("Timeout while waiting for introspection of nodes {remaining:?}")]
    WaitTimeout {
        /// Targets that never reported `finished`.
        remaining: Vec<String>,
    },

    /// Requested interface is not present in the node inventory.
    #[error("Interface {0} was not found on this node")]
    InterfaceNotFound(String),

    /// A caller-supplied argument has the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required caller argument is missing or empty.
    #[error("The {0} argument is required")]
    MissingArgument(String),

    /// The resolved service URL is not an absolute URL.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connectivity or protocol failure raised by the transport.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl InspectorError {
    /// Wrap an arbitrary transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        InspectorError::Transport(Box::new(err))
    }

    /// HTTP status of a server-side error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            InspectorError::Remote(remote) => Some(remote.status),
            _ => None,
        }
    }

    /// Whether this error was caused by caller input rather than the server or network.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            InspectorError::MalformedVersion(_)
                | InspectorError::VersionTypeMismatch(_)
                | InspectorError::InvalidArgument(_)
                | InspectorError::MissingArgument(_)
        )
    }
}

impl From<reqwest::Error> for InspectorError {
    fn from(err: reqwest::Error) -> Self {
        InspectorError::transport(err)
    }
}

/// Error returned from the server.
///
/// Carries the best-effort message extracted from the body together with the
/// status, headers and body for programmatic inspection.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct RemoteError {
    /// Human readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

impl RemoteError {
    /// Build an error from a failed response, extracting its message.
    pub fn from_response(response: HttpResponse) -> Self {
        let message = extract_error_message(&response.body);
        tracing::debug!(
            status = response.status,
            message = %message,
            "Inspector returned error"
        );
        RemoteError {
            message,
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }

    /// Pass the response through, or turn it into an error when status >= 400.
    pub fn raise_if_needed(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_error() {
            Err(RemoteError::from_response(response).into())
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_if_needed_passes_success() {
        let response = HttpResponse::new(204, HeaderMap::new(), Bytes::new());
        assert!(RemoteError::raise_if_needed(response).is_ok());
    }

    #[test]
    fn test_raise_if_needed_json_message() {
        let response = HttpResponse::new(
            400,
            HeaderMap::new(),
            Bytes::from_static(br#"{"error":{"message":"boom"}}"#),
        );
        let err = RemoteError::raise_if_needed(response).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_remote_error_keeps_body() {
        let response = HttpResponse::new(500, HeaderMap::new(), Bytes::from_static(b"oops"));
        let remote = RemoteError::from_response(response);
        assert_eq!(remote.status, 500);
        assert_eq!(&remote.body[..], b"oops");
        assert_eq!(remote.message, "oops");
    }

    #[test]
    fn test_version_not_supported_display() {
        let err = InspectorError::VersionNotSupported {
            expected: ApiVersion::new(1, 99),
            supported: VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 5)),
        };
        let text = err.to_string();
        assert!(text.contains("1.99"));
        assert!(text.contains("1.0 to 1.5"));
    }

    #[test]
    fn test_caller_errors() {
        assert!(InspectorError::MalformedVersion("x".into()).is_caller_error());
        assert!(InspectorError::MissingArgument("node_ids".into()).is_caller_error());
        assert!(!InspectorError::WaitTimeout { remaining: vec![] }.is_caller_error());
    }
}
