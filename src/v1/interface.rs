//! Per-interface views of stored introspection data.
//!
//! Stored data carries an `all_interfaces` object keyed by interface name.
//! Each entry has a `mac` and, when LLDP collection is enabled on the ramdisk,
//! an `lldp_processed` section with switch details. The functions here pick
//! named fields out of that structure without touching the network.

use crate::error::{InspectorError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Every known interface field with its display label.
pub const FIELDS: &[(&str, &str)] = &[
    ("interface", "Interface"),
    ("mac", "MAC Address"),
    ("node_ident", "Node"),
    ("switch_capabilities_enabled", "Switch Capabilities Enabled"),
    ("switch_capabilities_support", "Switch Capabilities Supported"),
    ("switch_chassis_id", "Switch Chassis ID"),
    ("switch_mgmt_addresses", "Switch Management Addresses"),
    ("switch_port_autonegotiation_enabled", "Switch Port Autonegotiation Enabled"),
    ("switch_port_autonegotiation_support", "Switch Port Autonegotiation Supported"),
    ("switch_port_description", "Switch Port Description"),
    ("switch_port_id", "Switch Port ID"),
    ("switch_port_link_aggregation_enabled", "Switch Port Link Aggregation Enabled"),
    ("switch_port_link_aggregation_support", "Switch Port Link Aggregation Supported"),
    ("switch_port_link_aggregation_id", "Switch Port Link Aggregation ID"),
    ("switch_port_management_vlan_id", "Switch Port Mgmt VLAN ID"),
    ("switch_port_mau_type", "Switch Port Mau Type"),
    ("switch_port_mtu", "Switch Port MTU"),
    ("switch_port_physical_capabilities", "Switch Port Physical Capabilities"),
    ("switch_port_protocol_vlan_enabled", "Switch Port Protocol VLAN Enabled"),
    ("switch_port_protocol_vlan_support", "Switch Port Protocol VLAN Supported"),
    ("switch_port_protocol_vlan_ids", "Switch Port Protocol VLAN IDs"),
    ("switch_port_untagged_vlan_id", "Switch Port Untagged VLAN"),
    ("switch_port_vlans", "Switch Port VLANs"),
    ("switch_port_vlan_ids", "Switch Port VLAN IDs"),
    ("switch_protocol_identities", "Switch Protocol Identities"),
    ("switch_system_description", "Switch System Description"),
    ("switch_system_name", "Switch System Name"),
];

/// Fields shown when the caller does not choose any.
pub const DEFAULT_FIELD_IDS: &[&str] = &[
    "interface",
    "mac",
    "switch_port_vlan_ids",
    "switch_chassis_id",
    "switch_port_id",
];

/// Display label of a known field.
pub fn field_label(field_id: &str) -> Option<&'static str> {
    FIELDS
        .iter()
        .find(|(id, _)| *id == field_id)
        .map(|(_, label)| *label)
}

/// A selection of interface fields, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceResource {
    fields: Vec<&'static str>,
}

impl InterfaceResource {
    /// Select `field_ids`, keeping the caller's order.
    ///
    /// Unknown ids are rejected with [`InspectorError::InvalidArgument`].
    pub fn new<S: AsRef<str>>(field_ids: &[S]) -> Result<Self> {
        let fields = field_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                FIELDS
                    .iter()
                    .find(|(known, _)| *known == id)
                    .map(|(known, _)| *known)
                    .ok_or_else(|| {
                        InspectorError::InvalidArgument(format!("unknown interface field {}", id))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(InterfaceResource { fields })
    }

    /// Every known field, sorted by id.
    pub fn detailed() -> Self {
        let mut fields: Vec<&'static str> = FIELDS.iter().map(|(id, _)| *id).collect();
        fields.sort_unstable();
        InterfaceResource { fields }
    }

    /// Selected field ids.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Labels of the selected fields, same order as [`fields`](Self::fields).
    pub fn labels(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter_map(|id| field_label(id))
            .collect()
    }
}

impl Default for InterfaceResource {
    fn default() -> Self {
        InterfaceResource {
            fields: DEFAULT_FIELD_IDS.to_vec(),
        }
    }
}

/// Field values of one interface, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceData {
    entries: Vec<(String, Value)>,
}

impl InterfaceData {
    /// Value of a field, if it was requested.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// `(field, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Values in request order.
    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for InterfaceData {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn all_interfaces(data: &Value) -> Option<&Map<String, Value>> {
    data.get("all_interfaces").and_then(Value::as_object)
}

fn vlan_ids(lldp: Option<&Map<String, Value>>) -> Vec<Value> {
    lldp.and_then(|lldp| lldp.get("switch_port_vlans"))
        .and_then(Value::as_array)
        .map(|vlans| {
            vlans
                .iter()
                .filter_map(|vlan| vlan.get("id").cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Pick `fields` for `interface` out of stored introspection `data`.
///
/// `node_ident`, `interface`, `mac` and `switch_port_vlan_ids` are computed;
/// every other field is read from `lldp_processed` and is `null` when absent.
pub fn extract_interface_data<S: AsRef<str>>(
    data: &Value,
    node_ident: &str,
    interface: &str,
    fields: &[S],
) -> Result<InterfaceData> {
    let entry = all_interfaces(data)
        .and_then(|interfaces| interfaces.get(interface))
        .ok_or_else(|| InspectorError::InterfaceNotFound(interface.to_string()))?;
    let lldp = entry.get("lldp_processed").and_then(Value::as_object);

    let entries = fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            let value = match field {
                "node_ident" => Value::String(node_ident.to_string()),
                "interface" => Value::String(interface.to_string()),
                "mac" => entry.get("mac").cloned().unwrap_or(Value::Null),
                "switch_port_vlan_ids" => Value::Array(vlan_ids(lldp)),
                other => lldp
                    .and_then(|lldp| lldp.get(other))
                    .cloned()
                    .unwrap_or(Value::Null),
            };
            (field.to_string(), value)
        })
        .collect();

    Ok(InterfaceData { entries })
}

/// Rows of `fields` for every interface in `data`, in the order the server
/// listed them under `all_interfaces`.
///
/// With a non-empty `vlans` filter only interfaces attached to at least one
/// of those VLAN ids are kept. The filter reads `lldp_processed` directly, so
/// it applies even when `switch_port_vlan_ids` is not among `fields`.
pub fn extract_all_interface_data<S: AsRef<str>>(
    data: &Value,
    node_ident: &str,
    fields: &[S],
    vlans: Option<&[u64]>,
) -> Result<Vec<Vec<Value>>> {
    let wanted: BTreeSet<u64> = vlans.unwrap_or_default().iter().copied().collect();
    let Some(interfaces) = all_interfaces(data) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::with_capacity(interfaces.len());
    for (name, entry) in interfaces {
        if !wanted.is_empty() {
            let lldp = entry.get("lldp_processed").and_then(Value::as_object);
            let attached = vlan_ids(lldp)
                .iter()
                .filter_map(Value::as_u64)
                .any(|id| wanted.contains(&id));
            if !attached {
                continue;
            }
        }
        rows.push(extract_interface_data(data, node_ident, name, fields)?.values());
    }
    Ok(rows)
}
