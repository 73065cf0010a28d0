//! Outbound HTTP transport

use crate::error::{ParleyError, ParleyResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Default end-to-end timeout for one vendor call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A JSON POST to a vendor endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status plus parsed body. Non-JSON bodies arrive as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests; any failure to obtain a response is `ParleyError::Transport`
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> ParleyResult<HttpResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> ParleyResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ParleyError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %redact_query(&request.url)), level = "debug")]
    async fn post(&self, request: HttpRequest) -> ParleyResult<HttpResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ParleyError::transport_with_url(
                    format!("Request timed out after {}s", request.timeout.as_secs()),
                    redact_query(&request.url),
                )
            } else {
                ParleyError::transport_with_url(
                    format!("Request failed: {}", e),
                    redact_query(&request.url),
                )
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            ParleyError::transport_with_url(
                format!("Failed to read response body: {}", e),
                redact_query(&request.url),
            )
        })?;
        tracing::debug!(status, bytes = text.len(), "vendor response received");

        Ok(HttpResponse {
            status,
            body: parse_body(text),
        })
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

// Gemini carries the key in the query string; keep it out of logs and errors.
fn redact_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?[REDACTED]", base),
        None => url.to_string(),
    }
}
