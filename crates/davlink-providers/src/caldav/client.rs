//! HTTP client for the CalDAV discovery request.
//!
//! This module sends exactly one request per call and hands back the raw
//! status and body; deciding what the status means is the probe's job.

use reqwest::{Client, Method, Response, StatusCode};
use tracing::trace;

use crate::error::{ProviderError, ProviderResult};

use super::config::ProbeConfig;

/// Largest response body accepted from a server (1 MiB).
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Status and body of a DAV response.
#[derive(Debug, Clone)]
pub struct DavResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body (possibly empty).
    pub body: String,
}

/// HTTP client for CalDAV requests.
pub struct CalDavClient {
    /// The underlying HTTP client.
    client: Client,
    /// Timeout applied to every request, kept for error messages.
    timeout_secs: f64,
}

impl CalDavClient {
    /// Creates a new CalDAV client with the given configuration.
    pub fn new(config: &ProbeConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            client,
            timeout_secs: config.timeout.as_secs_f64(),
        })
    }

    /// Performs a PROPFIND request with a precomputed `Authorization` value.
    pub async fn propfind(
        &self,
        url: &str,
        authorization: &str,
        body: &str,
        depth: u8,
    ) -> ProviderResult<DavResponse> {
        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|_| ProviderError::internal("Invalid HTTP method: PROPFIND"))?;

        trace!(url = %url, depth, "Sending PROPFIND");

        let response = self
            .client
            .request(method, url)
            .header("Content-Type", "application/xml; charset=utf-8")
            .header("Depth", depth.to_string())
            .header("Authorization", authorization)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| self.transport_error("Request failed", e))?;

        let status = response.status();
        trace!(status = %status, "Received response");

        let body = self.read_body(response).await?;
        Ok(DavResponse { status, body })
    }

    /// Reads the body, refusing anything larger than [`MAX_RESPONSE_BYTES`].
    async fn read_body(&self, mut response: Response) -> ProviderResult<String> {
        if let Some(length) = response.content_length() {
            if length > MAX_RESPONSE_BYTES as u64 {
                return Err(body_too_large());
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error("Failed to read response", e))?
        {
            if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
                return Err(body_too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn transport_error(&self, context: &str, err: reqwest::Error) -> ProviderError {
        let error = if err.is_timeout() {
            ProviderError::timeout(format!(
                "{}: timed out after {}s",
                context, self.timeout_secs
            ))
        } else if err.is_connect() {
            ProviderError::network(format!("{}: connection failed: {}", context, err))
        } else if err.is_builder() {
            ProviderError::network(format!("{}: invalid request: {}", context, err))
        } else {
            ProviderError::network(format!("{}: {}", context, err))
        };
        error.with_source(err)
    }
}

fn body_too_large() -> ProviderError {
    ProviderError::invalid_response(format!(
        "response body exceeds {} bytes",
        MAX_RESPONSE_BYTES
    ))
}
