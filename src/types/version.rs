//! API version value types.
//!
//! An [`ApiVersion`] is a `(major, minor)` pair. Callers may name a version as
//! an integer (`1` means `1.0`), a component sequence (`[1, 2]`), a string
//! (`"1.2"` or `"1"`) or a loosely typed JSON value; [`VersionInput`] is the
//! closed set of accepted shapes and [`ApiVersion::parse`] is the only place
//! that inspects it.
//!
//! # Examples
//!
//! ```
//! use inspector_client::ApiVersion;
//!
//! assert_eq!(ApiVersion::parse(1u32).unwrap(), ApiVersion::new(1, 0));
//! assert_eq!(ApiVersion::parse("1.2").unwrap(), ApiVersion::new(1, 2));
//! assert_eq!(ApiVersion::parse((1u32, 2u32)).unwrap(), ApiVersion::new(1, 2));
//! assert!(ApiVersion::new(1, 2) < ApiVersion::new(1, 10));
//! ```

use crate::error::{InspectorError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Two component API version, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ApiVersion {
    /// Major component, selects the `/v<major>` URL prefix.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
}

impl ApiVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        ApiVersion { major, minor }
    }

    /// Parse any accepted version shape.
    ///
    /// A single component is padded with a zero minor. More than two
    /// components, or text that is not `X` / `X.Y` made of digits, fails with
    /// [`InspectorError::MalformedVersion`]. A sequence holding a
    /// non-integer entry fails with [`InspectorError::VersionTypeMismatch`].
    pub fn parse(input: impl Into<VersionInput>) -> Result<Self> {
        match input.into() {
            VersionInput::Int(major) => Ok(ApiVersion::new(major, 0)),
            VersionInput::Components(components) => Self::from_components(&components),
            VersionInput::Text(text) => Self::from_components(&split_components(&text)?),
            VersionInput::Json(value) => Self::from_json(&value),
        }
    }

    /// Path segment for this version, e.g. `/v1`.
    pub fn url_segment(&self) -> String {
        format!("/v{}", self.major)
    }

    fn from_components(components: &[u32]) -> Result<Self> {
        match components {
            [major] => Ok(ApiVersion::new(*major, 0)),
            [major, minor] => Ok(ApiVersion::new(*major, *minor)),
            _ => Err(InspectorError::MalformedVersion(format!(
                "API version should be of length 1 or 2, got {:?}",
                components
            ))),
        }
    }

    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Self::from_components(&split_components(text)?),
            Value::Array(items) => {
                let components = items
                    .iter()
                    .map(|item| {
                        item.as_u64()
                            .and_then(|n| u32::try_from(n).ok())
                            .ok_or_else(|| InspectorError::VersionTypeMismatch(value.to_string()))
                    })
                    .collect::<Result<Vec<u32>>>()?;
                Self::from_components(&components)
            }
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(|major| ApiVersion::new(major, 0))
                .ok_or_else(|| InspectorError::VersionTypeMismatch(value.to_string())),
            other => Err(InspectorError::VersionTypeMismatch(other.to_string())),
        }
    }
}

fn split_components(text: &str) -> Result<Vec<u32>> {
    let malformed = || {
        InspectorError::MalformedVersion(format!(
            "expect tuple, string in form of X.Y or integer, got {:?}",
            text
        ))
    };

    text.split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u32>().map_err(|_| malformed())
        })
        .collect()
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self> {
        ApiVersion::parse(s)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = VersionInput::deserialize(deserializer)?;
        ApiVersion::parse(input).map_err(serde::de::Error::custom)
    }
}

/// Accepted shapes of a caller supplied version.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionInput {
    /// Major only, minor defaults to zero.
    Int(u32),
    /// One or two integer components.
    Components(Vec<u32>),
    /// `"X"` or `"X.Y"`.
    Text(String),
    /// Loosely typed input such as a config file value.
    Json(Value),
}

impl Default for VersionInput {
    fn default() -> Self {
        VersionInput::from(crate::DEFAULT_API_VERSION)
    }
}

impl From<u32> for VersionInput {
    fn from(major: u32) -> Self {
        VersionInput::Int(major)
    }
}

impl From<(u32, u32)> for VersionInput {
    fn from((major, minor): (u32, u32)) -> Self {
        VersionInput::Components(vec![major, minor])
    }
}

impl From<[u32; 2]> for VersionInput {
    fn from(components: [u32; 2]) -> Self {
        VersionInput::Components(components.to_vec())
    }
}

impl From<Vec<u32>> for VersionInput {
    fn from(components: Vec<u32>) -> Self {
        VersionInput::Components(components)
    }
}

impl From<&[u32]> for VersionInput {
    fn from(components: &[u32]) -> Self {
        VersionInput::Components(components.to_vec())
    }
}

impl From<&str> for VersionInput {
    fn from(text: &str) -> Self {
        VersionInput::Text(text.to_string())
    }
}

impl From<String> for VersionInput {
    fn from(text: String) -> Self {
        VersionInput::Text(text)
    }
}

impl From<ApiVersion> for VersionInput {
    fn from(version: ApiVersion) -> Self {
        VersionInput::Components(vec![version.major, version.minor])
    }
}

impl From<Value> for VersionInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => VersionInput::Text(text),
            Value::Number(n) => match n.as_u64().and_then(|major| u32::try_from(major).ok()) {
                Some(major) => VersionInput::Int(major),
                None => VersionInput::Json(Value::Number(n)),
            },
            other => VersionInput::Json(other),
        }
    }
}

impl<'de> Deserialize<'de> for VersionInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(VersionInput::from)
    }
}

/// Inclusive range of API versions supported by a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    /// Lowest supported version.
    pub minimum: ApiVersion,
    /// Highest supported version.
    pub maximum: ApiVersion,
}

impl VersionRange {
    /// Create a range.
    pub const fn new(minimum: ApiVersion, maximum: ApiVersion) -> Self {
        VersionRange { minimum, maximum }
    }

    /// Range assumed for servers that predate version negotiation.
    pub const fn legacy() -> Self {
        VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 0))
    }

    /// Whether `version` lies within the range, both ends included.
    pub fn contains(&self, version: &ApiVersion) -> bool {
        self.minimum <= *version && *version <= self.maximum
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.minimum, self.maximum)
    }
}

impl From<VersionRange> for (ApiVersion, ApiVersion) {
    fn from(range: VersionRange) -> Self {
        (range.minimum, range.maximum)
    }
}
