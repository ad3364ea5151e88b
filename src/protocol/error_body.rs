//! Extraction of human readable messages from error response bodies.
//!
//! | Body | Message |
//! |------|---------|
//! | `{"error": {"message": "boom"}}` | `boom` |
//! | `boom` (not JSON, legacy servers) | `boom` |
//! | `{"error_message": "..."}` (provisioning service) | hint about the wrong URL |
//! | any other JSON, e.g. `42` | the raw body text |

use serde_json::Value;

/// Extract the message to show for an error response body.
///
/// Never fails: when the body has no recognizable shape the decoded text
/// itself is the message.
///
/// # Examples
///
/// ```
/// use inspector_client::protocol::extract_error_message;
///
/// assert_eq!(extract_error_message(br#"{"error":{"message":"boom"}}"#), "boom");
/// assert_eq!(extract_error_message(b"boom"), "boom");
/// assert_eq!(extract_error_message(b"42"), "42");
/// ```
pub fn extract_error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).into_owned();

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!("Old style error response returned, assuming plain text body");
            return text;
        }
    };

    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }

    if let Some(detail) = value.get("error_message") {
        let detail = detail
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| detail.to_string());
        return format!(
            "Received Ironic-style response {}. Are you trying to access \
             Ironic URL instead of Ironic Inspector?",
            detail
        );
    }

    tracing::error!(body = %text, "Bad error response from Ironic Inspector");
    text
}
