//! URL helpers for the inspector client.
//!
//! # Examples
//!
//! ```
//! use inspector_client::client::{join_url, with_version_suffix};
//!
//! assert_eq!(join_url("http://h/v1/", "/foo/bar"), "http://h/v1/foo/bar");
//! assert_eq!(with_version_suffix("http://h:5050/", 1), "http://h:5050/v1");
//! assert_eq!(with_version_suffix("http://h:5050/v1", 1), "http://h:5050/v1");
//! ```

/// Strip every trailing slash.
pub fn strip_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Join a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        strip_trailing_slashes(base),
        path.trim_start_matches('/')
    )
}

/// Append `/v<major>` unless the URL already ends with exactly that segment.
///
/// Only a literal suffix match counts: `http://h/v10` with major 1 becomes
/// `http://h/v10/v1`.
pub fn with_version_suffix(url: &str, major: u32) -> String {
    let base = strip_trailing_slashes(url);
    let segment = format!("/v{}", major);
    if base.ends_with(&segment) {
        base.to_string()
    } else {
        format!("{}{}", base, segment)
    }
}

/// Render a boolean the way the service expects it in query strings.
pub fn bool_query_value(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
