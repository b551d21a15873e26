//! OpenAI image generation (`/images/generations`) with base64 payloads.

use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::core::{
    ApiKey, GeneratedImage, HttpClient, HttpClientConfig, ImageGenerator, ImageRequest, LlmError,
    http::bearer,
};
use crate::provider::{Provider, constants::openai};

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: openai::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn from_api_key(api_key: ApiKey) -> Result<Self, LlmError> {
        Ok(Self::new(api_key.resolve(Provider::OpenAI)?))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

pub struct OpenAiImageClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiImageClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config.clone(), None)?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    #[tracing::instrument(
        name = "openai_image_generation",
        skip(self, request),
        fields(model = %request.model, size = %request.size),
        err
    )]
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError> {
        let url = format!("{}{}", self.config.base_url, openai::IMAGES_ENDPOINT);
        let body = ImageGenerationRequest {
            model: &request.model,
            prompt: &request.prompt,
            size: &request.size,
            n: request.n,
            response_format: "b64_json",
        };
        let headers = [bearer(&self.config.api_key)];

        let response: ImageGenerationResponse = self.http.post_json(&url, &headers, &body).await?;
        response.decode_first()
    }
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageGenerationData>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationData {
    b64_json: Option<String>,
}

impl ImageGenerationResponse {
    fn decode_first(self) -> Result<GeneratedImage, LlmError> {
        let encoded = self
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.b64_json)
            .ok_or_else(|| LlmError::Parse {
                message: "No base64 image in response".to_string(),
                source: "missing `data[0].b64_json`".into(),
            })?;

        let bytes = BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| LlmError::Parse {
                message: "Failed to decode base64 image".to_string(),
                source: Box::new(e),
            })?;

        Ok(GeneratedImage { bytes })
    }
}
