//! HTTP transport seam.
//!
//! All network access goes through [`HttpTransport`] so the authenticator
//! and fetcher can be exercised in tests with a scripted transport. The
//! production implementation wraps a `reqwest::Client` with the fixed
//! request timeout.

use async_trait::async_trait;
use serde_json::Value;

use crate::types::errors::NetworkError;

/// Fixed request timeout in seconds. Requests exceeding it fail outright;
/// there is no backoff.
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

const USER_AGENT: &str = "Mozilla/5.0";

/// Minimal JSON-over-HTTP operations the dashboard needs.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs a form-encoded body and decodes the JSON response.
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Value, NetworkError>;

    /// GETs a JSON document with the given extra headers.
    async fn get_json(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Value, NetworkError>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    async fn decode_json(response: reqwest::Response) -> Result<Value, NetworkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        if body.trim().is_empty() {
            return Err(NetworkError::InvalidBody("empty response".to_string()));
        }

        serde_json::from_str(&body).map_err(|e| NetworkError::InvalidBody(e.to_string()))
    }

    fn map_request_error(e: reqwest::Error) -> NetworkError {
        if e.is_timeout() {
            NetworkError::Timeout(e.to_string())
        } else {
            NetworkError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Value, NetworkError> {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .form(fields)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::decode_json(response).await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Value, NetworkError> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(Self::map_request_error)?;

        Self::decode_json(response).await
    }
}
