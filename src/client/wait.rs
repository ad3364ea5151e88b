//! Blocking poll loop over several introspection targets.
//!
//! [`wait_for_finish`] polls each unfinished target once per attempt, in
//! input order, until every one reports `finished` or the retry budget is
//! spent. Sleeping happens only between attempts and goes through a caller
//! supplied function so tests can run without real delays.

use crate::error::{InspectorError, Result};
use crate::types::IntrospectionStatus;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Delay between polling attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Number of sleeps before giving up. With the default interval this is ten hours.
pub const DEFAULT_MAX_RETRIES: u32 = 3600;

/// A status document that knows whether introspection is over.
pub trait StatusPayload {
    /// Whether the target reached a final state (success or error).
    fn is_finished(&self) -> bool;
}

impl StatusPayload for Value {
    fn is_finished(&self) -> bool {
        self.get("finished").and_then(Value::as_bool).unwrap_or(false)
    }
}

impl StatusPayload for IntrospectionStatus {
    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Per-target progress of the loop.
#[derive(Debug)]
enum PollState<P> {
    Pending,
    Done(P),
}

/// Poll `targets` until all of them are finished.
///
/// `status_fn` is called once per unfinished target per attempt. Up to
/// `max_retries + 1` attempts are made and `sleep` runs between them, so a
/// timeout happens after exactly `max_retries` sleeps. The first error from
/// `status_fn` aborts the wait.
///
/// Returns the final status of every target, keyed by target id.
///
/// # Errors
///
/// - [`InspectorError::MissingArgument`] if `targets` is empty, before any call
/// - [`InspectorError::WaitTimeout`] listing the targets still pending
/// - any error produced by `status_fn`
///
/// # Examples
///
/// ```
/// use inspector_client::client::wait_for_finish;
/// use serde_json::json;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let result = wait_for_finish(
///     &["node-1"],
///     Duration::from_secs(10),
///     5,
///     |_| {
///         calls += 1;
///         Ok(json!({"finished": calls > 1}))
///     },
///     |_| {},
/// )
/// .unwrap();
/// assert_eq!(result["node-1"]["finished"], true);
/// ```
pub fn wait_for_finish<S, P, F, Z>(
    targets: &[S],
    retry_interval: Duration,
    max_retries: u32,
    mut status_fn: F,
    mut sleep: Z,
) -> Result<BTreeMap<String, P>>
where
    S: AsRef<str>,
    P: StatusPayload,
    F: FnMut(&str) -> Result<P>,
    Z: FnMut(Duration),
{
    if targets.is_empty() {
        return Err(InspectorError::MissingArgument("node_ids".into()));
    }

    let mut states: Vec<(String, PollState<P>)> = targets
        .iter()
        .map(|target| (target.as_ref().to_string(), PollState::Pending))
        .collect();

    for attempt in 0..=max_retries {
        if attempt > 0 {
            sleep(retry_interval);
        }

        for (target, state) in states.iter_mut() {
            if let PollState::Done(_) = state {
                continue;
            }
            let status = status_fn(target.as_str())?;
            if status.is_finished() {
                tracing::debug!(node = %target, attempt, "Introspection finished");
                *state = PollState::Done(status);
            }
        }

        let pending = states
            .iter()
            .filter(|(_, state)| matches!(state, PollState::Pending))
            .count();
        if pending == 0 {
            return Ok(states
                .into_iter()
                .filter_map(|(target, state)| match state {
                    PollState::Done(status) => Some((target, status)),
                    PollState::Pending => None,
                })
                .collect());
        }

        tracing::debug!(
            attempt,
            pending,
            max_retries,
            "Still waiting for introspection to finish"
        );
    }

    let remaining: Vec<String> = states
        .into_iter()
        .filter(|(_, state)| matches!(state, PollState::Pending))
        .map(|(target, _)| target)
        .collect();
    tracing::error!(remaining = ?remaining, "Timeout waiting for introspection");
    Err(InspectorError::WaitTimeout { remaining })
}
