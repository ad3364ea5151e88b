//! Request and response values exchanged with a [`Transport`](crate::client::Transport).

use crate::error::Result;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A fully received HTTP response.
///
/// Header lookup is case-insensitive. The body is kept raw; decoding it is
/// the caller's concern.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        HttpResponse {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Whether the status is 400 or above.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Header value as text, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Optional parts of a request issued through
/// [`InspectorClient::request`](crate::InspectorClient::request).
///
/// # Examples
///
/// ```
/// use inspector_client::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .with_query("limit", "10")
///     .with_json(json!({"uuid": "abc"}));
/// assert_eq!(options.query.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; the version header always overrides a caller value.
    pub headers: HeaderMap,
    /// Query string parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub json: Option<Value>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A request ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Headers including version and auth
    pub headers: HeaderMap,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub json: Option<Value>,
}
