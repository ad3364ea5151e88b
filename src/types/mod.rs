//! Core value types shared by the client layers.
//!
//! - [`ApiVersion`], [`VersionInput`], [`VersionRange`] - version negotiation values
//! - [`HttpResponse`], [`RequestOptions`], [`OutgoingRequest`] - transport boundary
//! - [`IntrospectionStatus`] - per-node status payload

mod response;
mod status;
mod version;

pub use response::{HttpResponse, OutgoingRequest, RequestOptions};
pub use status::IntrospectionStatus;
pub use version::{ApiVersion, VersionInput, VersionRange};
