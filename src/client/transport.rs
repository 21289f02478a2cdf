//! Transport
//!
//! The network boundary of the client. `ReqwestTransport` is the production
//! implementation; tests plug in their own.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::trace;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{HttpRequest, HttpResponse};

/// Sends one HTTP request and returns the raw response.
///
/// Implementations must not interpret the status code: a 4xx/5xx answer is
/// still `Ok(HttpResponse)`. `Err` is reserved for requests that never got
/// an answer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    fn name(&self) -> &'static str;
}

// == Reqwest Transport ==
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        trace!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
