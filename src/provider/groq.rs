//! Groq provider, spoken through its OpenAI-compatible chat completions API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    ApiKey, HttpClient, HttpClientConfig, LanguageModelUsage, LlmError, ResponseMetadata,
    TextGenerator, TextRequest, TextResponse, http::bearer,
};
use crate::provider::{Provider, constants::groq};

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl GroqConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: groq::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn from_api_key(api_key: ApiKey) -> Result<Self, LlmError> {
        Ok(Self::new(api_key.resolve(Provider::Groq)?))
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

pub struct GroqClient {
    config: GroqConfig,
    http: HttpClient,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config.clone(), None)?;
        Ok(Self { config, http })
    }

    fn url(&self) -> String {
        format!("{}{}", self.config.base_url, groq::CHAT_COMPLETIONS_ENDPOINT)
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    #[tracing::instrument(
        name = "groq_chat_completion",
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len()),
        err
    )]
    async fn generate_text(&self, request: TextRequest) -> Result<TextResponse, LlmError> {
        let body = ChatCompletionRequest::from(&request);
        let headers = [bearer(&self.config.api_key)];

        let response: ChatCompletionResponse =
            self.http.post_json(&self.url(), &headers, &body).await?;

        response.into_text_response()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a TextRequest> for ChatCompletionRequest<'a> {
    fn from(request: &'a TextRequest) -> Self {
        let config = request.generation_config.clone().unwrap_or_default();

        Self {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatCompletionResponse {
    fn into_text_response(self) -> Result<TextResponse, LlmError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| LlmError::Parse {
            message: "No choices in response".to_string(),
            source: "empty `choices` array".into(),
        })?;

        Ok(TextResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: self.usage.map(|u| LanguageModelUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            metadata: ResponseMetadata {
                provider: Provider::Groq,
                model: self.model,
                id: self.id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GenerationConfig, Message};
    use serde_json::json;

    #[test]
    fn request_serializes_only_set_parameters() {
        let request = TextRequest {
            model: "llama3-70b-8192".to_string(),
            messages: vec![Message::user("Qual a melhor época para visitar Recife?")],
            generation_config: Some(GenerationConfig {
                max_tokens: Some(150),
                ..Default::default()
            }),
        };

        let body = serde_json::to_value(ChatCompletionRequest::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "llama3-70b-8192",
                "messages": [
                    {"role": "user", "content": "Qual a melhor época para visitar Recife?"}
                ],
                "max_tokens": 150,
                "stream": false
            })
        );
    }

    #[test]
    fn null_content_becomes_empty_text() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "llama3-70b-8192",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();

        let text = response.into_text_response().unwrap();
        assert_eq!(text.text, "");
        assert!(text.usage.is_none());
        assert_eq!(text.metadata.provider, Provider::Groq);
    }

    #[test]
    fn missing_choices_is_a_parse_error() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"id": "chatcmpl-2", "choices": []})).unwrap();

        assert!(matches!(
            response.into_text_response(),
            Err(LlmError::Parse { .. })
        ));
    }
}
