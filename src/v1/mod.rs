//! Typed client for version 1 of the introspection API.
//!
//! [`ClientV1`] wraps a negotiated [`InspectorClient`] and turns each
//! endpoint into a method. Everything [`InspectorClient`] offers stays
//! reachable through `Deref`.
//!
//! # Module Organization
//!
//! ```text
//! v1/
//! ├── interface  - per-interface views of stored data, field catalogue
//! ├── rules      - introspection rules API
//! └── shorthand  - one-shot helpers building a client per call
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use inspector_client::v1::ClientV1;
//! use inspector_client::ClientConfig;
//!
//! let client = ClientV1::new(ClientConfig::default().with_url("http://10.0.0.2:5050"))?;
//! client.introspect("node-1", Some(true))?;
//! let statuses = client.wait_for_finish_default(&["node-1"])?;
//! assert!(statuses["node-1"].finished);
//! ```

mod interface;
mod rules;
mod shorthand;

pub use interface::{
    extract_all_interface_data, extract_interface_data, field_label, InterfaceData,
    InterfaceResource, DEFAULT_FIELD_IDS, FIELDS,
};
pub use rules::RulesApi;
pub use shorthand::{get_status, introspect, server_api_versions};

use crate::client::{
    bool_query_value, wait_for_finish, ClientConfig, EndpointCatalog, InspectorClient, Transport,
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL,
};
use crate::error::{InspectorError, Result};
use crate::types::{ApiVersion, IntrospectionStatus, RequestOptions};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

/// Version requested when the configuration does not name one.
pub const DEFAULT_API_VERSION: ApiVersion = crate::DEFAULT_API_VERSION;

/// Highest version this client knows how to use.
///
/// Servers may support newer versions; they are simply not needed here.
pub const MAX_API_VERSION: ApiVersion = ApiVersion::new(1, 13);

#[derive(Deserialize)]
struct StatusList {
    introspection: Vec<IntrospectionStatus>,
}

/// Client for API v1.
#[derive(Debug, Clone)]
pub struct ClientV1 {
    inner: InspectorClient,
}

impl ClientV1 {
    /// Negotiate over the default reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(InspectorClient::new(config)?))
    }

    /// Negotiate over a caller supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self::from_client(InspectorClient::with_transport(config, transport)?))
    }

    /// Negotiate, resolving the URL through `catalog` when none is configured.
    pub fn with_catalog(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        catalog: &dyn EndpointCatalog,
    ) -> Result<Self> {
        Ok(Self::from_client(InspectorClient::with_catalog(config, transport, catalog)?))
    }

    /// Wrap an already negotiated client.
    pub fn from_client(inner: InspectorClient) -> Self {
        ClientV1 { inner }
    }

    /// The underlying client.
    pub fn inner(&self) -> &InspectorClient {
        &self.inner
    }

    /// Introspection rules API.
    pub fn rules(&self) -> RulesApi<'_> {
        RulesApi::new(&self.inner)
    }

    /// Start introspection of a node.
    ///
    /// `manage_boot` is sent only when set; otherwise the server default applies.
    pub fn introspect(&self, node_id: &str, manage_boot: Option<bool>) -> Result<()> {
        check_node_id(node_id)?;
        let mut options = RequestOptions::new();
        if let Some(manage_boot) = manage_boot {
            options = options.with_query("manage_boot", bool_query_value(manage_boot));
        }
        self.inner.post(&format!("/introspection/{}", node_id), options)?;
        Ok(())
    }

    /// Reprocess stored introspection data.
    ///
    /// Servers without data storage answer 404.
    pub fn reprocess(&self, node_id: &str) -> Result<()> {
        check_node_id(node_id)?;
        self.inner.post(
            &format!("/introspection/{}/data/unprocessed", node_id),
            RequestOptions::new(),
        )?;
        Ok(())
    }

    /// List statuses, newest first.
    ///
    /// `marker` is the UUID of the last item of the previous page.
    pub fn list_statuses(
        &self,
        marker: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<IntrospectionStatus>> {
        let mut options = RequestOptions::new();
        if let Some(marker) = marker {
            options = options.with_query("marker", marker);
        }
        if let Some(limit) = limit {
            options = options.with_query("limit", limit.to_string());
        }
        let list: StatusList = self
            .inner
            .request(http::Method::GET, "/introspection", options)?
            .json()?;
        Ok(list.introspection)
    }

    /// Introspection status of one node.
    pub fn get_status(&self, node_id: &str) -> Result<IntrospectionStatus> {
        check_node_id(node_id)?;
        self.inner.get(&format!("/introspection/{}", node_id))?.json()
    }

    /// Wait until every node in `node_ids` finished introspection.
    ///
    /// See [`wait_for_finish`](crate::client::wait_for_finish) for the retry rules.
    pub fn wait_for_finish<S, Z>(
        &self,
        node_ids: &[S],
        retry_interval: Duration,
        max_retries: u32,
        sleep: Z,
    ) -> Result<BTreeMap<String, IntrospectionStatus>>
    where
        S: AsRef<str>,
        Z: FnMut(Duration),
    {
        wait_for_finish(
            node_ids,
            retry_interval,
            max_retries,
            |node_id| self.get_status(node_id),
            sleep,
        )
    }

    /// [`wait_for_finish`](Self::wait_for_finish) with the default budget and a real sleep.
    pub fn wait_for_finish_default<S: AsRef<str>>(
        &self,
        node_ids: &[S],
    ) -> Result<BTreeMap<String, IntrospectionStatus>> {
        self.wait_for_finish(
            node_ids,
            DEFAULT_RETRY_INTERVAL,
            DEFAULT_MAX_RETRIES,
            std::thread::sleep,
        )
    }

    /// Stored introspection data as JSON.
    ///
    /// `processed` selects the final data over what the ramdisk sent.
    pub fn get_data(&self, node_id: &str, processed: bool) -> Result<Value> {
        self.data_response(node_id, processed)?.json()
    }

    /// Stored introspection data as raw bytes.
    pub fn get_raw_data(&self, node_id: &str, processed: bool) -> Result<Bytes> {
        Ok(self.data_response(node_id, processed)?.body)
    }

    fn data_response(&self, node_id: &str, processed: bool) -> Result<crate::types::HttpResponse> {
        check_node_id(node_id)?;
        let path = if processed {
            format!("/introspection/{}/data", node_id)
        } else {
            format!("/introspection/{}/data/unprocessed", node_id)
        };
        self.inner.get(&path)
    }

    /// Abort running introspection.
    pub fn abort(&self, node_id: &str) -> Result<()> {
        check_node_id(node_id)?;
        self.inner.post(
            &format!("/introspection/{}/abort", node_id),
            RequestOptions::new(),
        )?;
        Ok(())
    }

    /// Fields of one interface from the node's processed data.
    ///
    /// LLDP fields are only populated when the ramdisk collected LLDP and a
    /// processing hook parsed it.
    pub fn get_interface_data<S: AsRef<str>>(
        &self,
        node_ident: &str,
        interface: &str,
        fields: &[S],
    ) -> Result<InterfaceData> {
        let data = self.get_data(node_ident, true)?;
        extract_interface_data(&data, node_ident, interface, fields)
    }

    /// Rows of fields for every interface, optionally filtered by VLAN ids.
    pub fn get_all_interface_data<S: AsRef<str>>(
        &self,
        node_ident: &str,
        fields: &[S],
        vlans: Option<&[u64]>,
    ) -> Result<Vec<Vec<Value>>> {
        let data = self.get_data(node_ident, true)?;
        extract_all_interface_data(&data, node_ident, fields, vlans)
    }
}

impl Deref for ClientV1 {
    type Target = InspectorClient;

    fn deref(&self) -> &InspectorClient {
        &self.inner
    }
}

fn check_node_id(node_id: &str) -> Result<()> {
    if node_id.is_empty() {
        return Err(InspectorError::InvalidArgument(
            "Expected non-empty string for node_id argument".into(),
        ));
    }
    Ok(())
}
