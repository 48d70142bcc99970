//! The I/O seam between `Validator` and the network.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and returns the complete
//! `HttpResponse`. Status codes are data at this layer; only failures to get a
//! response at all are errors. `ReqwestTransport` is the default and owns the
//! connection pool. Tests and embedders can plug in their own implementation
//! through `ValidatorConfig::transport`.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ValidatorError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes HTTP requests on behalf of a `Validator`.
///
/// Implementations must be safe to share between concurrent calls. Dropping
/// the returned future must abort the request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ValidatorError>;

    /// Per-request timeout enforced by this transport, if it has a fixed one.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ValidatorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ValidatorError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Wrap an existing client. `timeout` should reflect how the client was
    /// configured; it is only reported, not enforced.
    pub fn from_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ValidatorError> {
        let mut builder = self.client.post(&request.url).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ValidatorError {
    if err.is_timeout() {
        ValidatorError::Timeout
    } else {
        ValidatorError::Transport(err.to_string())
    }
}
