//! Transport seam between the API client and the network.
//!
//! [`Transport`] is the single point where a request leaves the
//! process. [`HttpTransport`] is the live implementation over reqwest;
//! [`MockTransport`] records requests and replays canned outcomes for
//! tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use reqwest::Method;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A request ready to be sent by a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// A POST request with no headers and no body.
    /// Every endpoint of this API is a POST.
    pub fn post(url: Url) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// First header with the given name, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw outcome of one transport round trip.
///
/// An empty HTTP body is reported as `body: None`. A status is absent
/// only when the transport could not produce one.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: Option<u16>,
    pub body: Option<Vec<u8>>,
}

/// Failure before any HTTP response was produced.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

/// One network call per invocation, resolving exactly once.
/// No retries; idempotency is the caller's responsibility.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, TransportError>;
}

/// Live transport over reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        debug!(status, len = bytes.len(), "response received");

        Ok(TransportResponse {
            status: Some(status),
            body: if bytes.is_empty() {
                None
            } else {
                Some(bytes.to_vec())
            },
        })
    }
}

/// Canned transport for tests.
///
/// Records every request it is handed and replays queued outcomes in
/// FIFO order. Clones share the same state, so a test can keep a
/// handle for assertions after moving the transport into a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    outcomes: VecDeque<Result<TransportResponse, TransportError>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn enqueue_response(&self, status: u16, body: impl AsRef<[u8]>) {
        let bytes = body.as_ref();
        self.push(Ok(TransportResponse {
            status: Some(status),
            body: if bytes.is_empty() {
                None
            } else {
                Some(bytes.to_vec())
            },
        }));
    }

    /// Queue a raw outcome, including shapes the live transport never
    /// produces, like a missing status.
    pub fn enqueue_outcome(&self, outcome: Result<TransportResponse, TransportError>) {
        self.push(outcome);
    }

    /// Queue a network-level failure.
    pub fn enqueue_failure(&self) {
        self.push(Err(TransportError::Network("connection reset".to_string())));
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn push(&self, outcome: Result<TransportResponse, TransportError>) {
        self.lock().outcomes.push_back(outcome);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no canned outcome".to_string())))
    }
}
