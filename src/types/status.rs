//! Introspection status payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status of introspection for a single node.
///
/// Only `finished` drives the wait loop; every field the server sends that
/// is not named here is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntrospectionStatus {
    /// Node UUID
    #[serde(default)]
    pub uuid: Option<String>,
    /// Whether introspection has finished
    #[serde(default)]
    pub finished: bool,
    /// Error string, `None` on success or while running
    #[serde(default)]
    pub error: Option<String>,
    /// Server side state machine state (API 1.9+)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO8601 start timestamp
    #[serde(default)]
    pub started_at: Option<String>,
    /// ISO8601 finish timestamp
    #[serde(default)]
    pub finished_at: Option<String>,
    /// Self links
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Value>,
    /// Everything else the server returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IntrospectionStatus {
    /// A finished status with no error.
    pub fn finished() -> Self {
        IntrospectionStatus {
            finished: true,
            ..Default::default()
        }
    }
}
