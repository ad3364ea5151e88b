//! One-shot helpers.
//!
//! Each call builds a fresh [`ClientV1`] from the configuration, negotiating
//! the version again. Keep a client around when issuing more than a couple
//! of requests.

use super::ClientV1;
use crate::client::{probe_api_versions, ClientConfig, ReqwestTransport};
use crate::error::Result;
use crate::types::{IntrospectionStatus, VersionRange};

/// Start introspection of `node_id`.
pub fn introspect(config: ClientConfig, node_id: &str, manage_boot: Option<bool>) -> Result<()> {
    ClientV1::new(config)?.introspect(node_id, manage_boot)
}

/// Introspection status of `node_id`.
pub fn get_status(config: ClientConfig, node_id: &str) -> Result<IntrospectionStatus> {
    ClientV1::new(config)?.get_status(node_id)
}

/// Version range the service advertises, without negotiating.
pub fn server_api_versions(config: &ClientConfig) -> Result<VersionRange> {
    let transport = ReqwestTransport::with_config(&config.transport)?;
    probe_api_versions(config, &transport, None)
}
