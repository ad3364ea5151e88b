//! Scripted transport used by unit tests.

use crate::client::Transport;
use crate::error::{InspectorError, Result};
use crate::protocol::names;
use crate::types::{HttpResponse, OutgoingRequest};
use http::{HeaderMap, HeaderValue};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::io;

pub(crate) fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(status, HeaderMap::new(), body.to_string())
}

pub(crate) fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(status, HeaderMap::new(), body.to_string())
}

pub(crate) fn probe_response(status: u16, min: Option<&str>, max: Option<&str>) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Some(min) = min {
        headers.insert(names::MIN_VERSION, HeaderValue::from_str(min).unwrap());
    }
    if let Some(max) = max {
        headers.insert(names::MAX_VERSION, HeaderValue::from_str(max).unwrap());
    }
    HttpResponse::new(status, headers, "")
}

pub(crate) fn connection_refused() -> InspectorError {
    InspectorError::transport(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
}

/// Answers probes with a fixed response and requests from a queue.
pub(crate) struct FakeTransport {
    probe: Option<HttpResponse>,
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    probes: Mutex<Vec<String>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl FakeTransport {
    pub(crate) fn with_probe(probe: HttpResponse) -> Self {
        FakeTransport {
            probe: Some(probe),
            responses: Mutex::new(VecDeque::new()),
            probes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_range(min: &str, max: &str) -> Self {
        Self::with_probe(probe_response(200, Some(min), Some(max)))
    }

    pub(crate) fn unreachable() -> Self {
        FakeTransport {
            probe: None,
            ..Self::with_probe(response(200, ""))
        }
    }

    pub(crate) fn push(&self, response: HttpResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        self.push(json_response(status, body));
    }

    pub(crate) fn push_error(&self, err: InspectorError) {
        self.responses.lock().push_back(Err(err));
    }

    pub(crate) fn probes(&self) -> Vec<String> {
        self.probes.lock().clone()
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.probes.lock().push(url.to_string());
        self.probe.clone().ok_or_else(connection_refused)
    }

    fn request(&self, request: OutgoingRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        self.responses.lock().pop_front().unwrap_or_else(|| Ok(response(200, "{}")))
    }
}
