//! Wire level conventions of the introspection API.
//!
//! - [`headers`] - version and auth header names, version header parsing
//! - [`error_body`] - message extraction from error responses

pub mod error_body;
pub mod headers;

pub use error_body::extract_error_message;
pub use headers::{format_version_header, names, parse_version_header, parse_version_range};

/// Service type used for endpoint catalog lookups.
pub const DEFAULT_SERVICE_TYPE: &str = "baremetal-introspection";

/// Port the service listens on when no catalog entry exists.
pub const DEFAULT_PORT: u16 = 5050;
