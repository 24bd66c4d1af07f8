//! Request execution and response interpretation.
//!
//! `ApiClient` runs a request through the [`Transport`] and maps the
//! raw outcome to a typed result. Two decode paths exist: the login
//! endpoint serves the bearer token as a plain-text body, everything
//! else is JSON.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::transport::{ApiRequest, Transport, TransportError};
use super::ApiError;

/// The only status the API treats as success.
const STATUS_OK: u16 = 200;

/// Executes requests and interprets their outcomes.
/// Clone is cheap - the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a bearer token.
    ///
    /// The token is the raw response body, which must be UTF-8 text,
    /// not a JSON envelope.
    pub async fn request_token(&self, request: ApiRequest) -> Result<String, ApiError> {
        let body = self.execute(request).await?;
        String::from_utf8(body).map_err(|_| ApiError::DecodingFailed)
    }

    /// Fetch a response and decode it as JSON into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|error| {
            debug!(%error, "response body did not match the expected shape");
            ApiError::DecodingFailed
        })
    }

    /// Send the request and apply the outcome policy, in order:
    /// transport failure, missing body, unexpected status. The caller
    /// decodes whatever body survives.
    async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let url = request.url.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(TransportError::Network(error)) => {
                debug!(%error, %url, "transport failure");
                return Err(ApiError::Unknown);
            }
        };

        let Some(body) = response.body else {
            return Err(ApiError::NoData);
        };

        if response.status != Some(STATUS_OK) {
            debug!(status = ?response.status, %url, "unexpected status");
            return Err(ApiError::StatusCode(response.status));
        }

        Ok(body)
    }
}
