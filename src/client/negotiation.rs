//! API version negotiation.
//!
//! Negotiation is a pure function of a transport, a probe URL and the
//! requested version, so it runs the same way whichever way the service URL
//! was resolved.
//!
//! 1. [`fetch_supported_range`] probes the unversioned service root without
//!    authentication and reads the advertised minimum and maximum versions.
//! 2. [`validate`] checks the requested version against that range.
//!
//! A `404` from the probe means a legacy server which supports exactly `1.0`.

use crate::client::Transport;
use crate::error::{InspectorError, RemoteError, Result};
use crate::protocol::parse_version_range;
use crate::types::{ApiVersion, VersionInput, VersionRange};

/// Fetch the version range advertised by the service root at `probe_url`.
///
/// # Errors
///
/// - [`InspectorError::Remote`] for any status >= 400 other than 404
/// - [`InspectorError::MalformedVersion`] if a version header cannot be parsed
/// - transport errors pass through unchanged
pub fn fetch_supported_range(transport: &dyn Transport, probe_url: &str) -> Result<VersionRange> {
    let response = transport.get(probe_url)?;

    // 404 is what servers predating negotiation answer on the root
    if response.is_error() && response.status != 404 {
        return Err(RemoteError::from_response(response).into());
    }

    let range = parse_version_range(&response.headers)?;
    tracing::debug!(
        url = probe_url,
        min = %range.minimum,
        max = %range.maximum,
        "Supported API version range"
    );
    Ok(range)
}

/// Parse `requested` and check that `range` contains it, both ends included.
pub fn validate(requested: impl Into<VersionInput>, range: &VersionRange) -> Result<ApiVersion> {
    let version = ApiVersion::parse(requested)?;
    if !range.contains(&version) {
        return Err(InspectorError::VersionNotSupported {
            expected: version,
            supported: *range,
        });
    }
    Ok(version)
}

/// Probe `probe_url` and validate `requested` against the result.
pub fn negotiate(
    transport: &dyn Transport,
    probe_url: &str,
    requested: impl Into<VersionInput>,
) -> Result<ApiVersion> {
    let requested = requested.into();
    // malformed input is reported before touching the network
    ApiVersion::parse(requested.clone())?;
    let range = fetch_supported_range(transport, probe_url)?;
    validate(requested, &range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{probe_response, response, FakeTransport};

    #[test]
    fn test_fetch_no_headers() {
        let transport = FakeTransport::with_probe(probe_response(200, None, None));
        let range = fetch_supported_range(&transport, "http://h:5050").unwrap();
        assert_eq!(range, VersionRange::legacy());
        assert_eq!(transport.probes(), vec!["http://h:5050".to_string()]);
    }

    #[test]
    fn test_fetch_404_same_as_no_headers() {
        let legacy = FakeTransport::with_probe(probe_response(404, None, None));
        let modern = FakeTransport::with_probe(probe_response(200, None, None));
        assert_eq!(
            fetch_supported_range(&legacy, "http://h").unwrap(),
            fetch_supported_range(&modern, "http://h").unwrap()
        );
    }

    #[test]
    fn test_fetch_with_headers_any_ok_status() {
        for status in [200, 204, 300, 404] {
            let transport =
                FakeTransport::with_probe(probe_response(status, Some("1.1"), Some("1.42")));
            let range = fetch_supported_range(&transport, "http://h").unwrap();
            assert_eq!(range.minimum, ApiVersion::new(1, 1));
            assert_eq!(range.maximum, ApiVersion::new(1, 42));
        }
    }

    #[test]
    fn test_fetch_other_error_status() {
        let transport = FakeTransport::with_probe(response(500, "boom"));
        let err = fetch_supported_range(&transport, "http://h").unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_fetch_malformed_header() {
        let transport = FakeTransport::with_probe(probe_response(200, Some("x"), None));
        let err = fetch_supported_range(&transport, "http://h").unwrap_err();
        assert!(matches!(err, InspectorError::MalformedVersion(_)));
    }

    #[test]
    fn test_fetch_transport_error_passes_through() {
        let transport = FakeTransport::unreachable();
        let err = fetch_supported_range(&transport, "http://h").unwrap_err();
        assert!(matches!(err, InspectorError::Transport(_)));
    }

    #[test]
    fn test_validate_boundaries() {
        let range = VersionRange::new(ApiVersion::new(1, 2), ApiVersion::new(1, 5));
        assert_eq!(validate("1.2", &range).unwrap(), ApiVersion::new(1, 2));
        assert_eq!(validate("1.5", &range).unwrap(), ApiVersion::new(1, 5));
        assert!(matches!(
            validate("1.1", &range),
            Err(InspectorError::VersionNotSupported { .. })
        ));
        assert!(matches!(
            validate("1.6", &range),
            Err(InspectorError::VersionNotSupported { .. })
        ));
    }

    #[test]
    fn test_validate_reports_expected_and_supported() {
        let range = VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 99));
        match validate((99u32, 42u32), &range) {
            Err(InspectorError::VersionNotSupported { expected, supported }) => {
                assert_eq!(expected, ApiVersion::new(99, 42));
                assert_eq!(supported, range);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_int_and_short_inputs() {
        let range = VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 99));
        assert_eq!(validate(1u32, &range).unwrap(), ApiVersion::new(1, 0));
        assert_eq!(validate(vec![1u32], &range).unwrap(), ApiVersion::new(1, 0));
        assert_eq!(validate("1.0", &range).unwrap(), ApiVersion::new(1, 0));
    }

    #[test]
    fn test_negotiate_rejects_malformed_without_probe() {
        let transport = FakeTransport::with_range("1.0", "1.5");
        let err = negotiate(&transport, "http://h", "a.b").unwrap_err();
        assert!(matches!(err, InspectorError::MalformedVersion(_)));
        assert!(transport.probes().is_empty());
    }

    #[test]
    fn test_negotiate_ok() {
        let transport = FakeTransport::with_range("1.0", "1.5");
        assert_eq!(
            negotiate(&transport, "http://h", "1.3").unwrap(),
            ApiVersion::new(1, 3)
        );
    }
}
