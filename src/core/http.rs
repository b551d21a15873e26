//! Shared HTTP client for all providers.
//!
//! Each call is a single blocking attempt: failures are surfaced to the caller
//! as they happen and never retried.

use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

/// Error envelope used by OpenAI-compatible APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("tourguide/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Make a POST request with a JSON body and decode the JSON response.
    ///
    /// Non-2xx responses become [`LlmError::Api`] carrying the provider's
    /// `error.message` when the body has one, the raw body otherwise.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| network_error("Request failed", e))?;

        let status = res.status();
        let response_text = res
            .text()
            .await
            .map_err(|e| network_error("Failed to read response body", e))?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");

            let message = serde_json::from_str::<ApiErrorEnvelope>(&response_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(response_text);

            return Err(LlmError::Api {
                message,
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(status = %status, bytes = response_text.len(), "HTTP request successful");

        serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}

/// Name the cause in the message; the page only shows `Display`.
fn network_error(context: &str, e: reqwest::Error) -> LlmError {
    let message = if e.is_timeout() {
        format!("Request timed out: {e}")
    } else if e.is_connect() {
        format!("Connection error: {e}")
    } else {
        format!("{context}: {e}")
    };

    LlmError::Network {
        message,
        source: Box::new(e),
    }
}

/// Build the `Authorization: Bearer` header pair.
pub(crate) fn bearer(api_key: &str) -> (String, String) {
    ("Authorization".to_string(), format!("Bearer {api_key}"))
}
