use std::marker::PhantomData;

use crate::provider::Provider;

use super::{
    error::LlmError,
    traits::TextGenerator,
    types::{GenerationConfig, Message, TextRequest, TextResponse},
};

pub struct Init;
pub struct Configuring;
pub struct MessagesSet;

/// Where a provider API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the provider's default environment variable (e.g. `GROQ_API_KEY`).
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(&self, provider: Provider) -> Result<String, LlmError> {
        let key = match self {
            ApiKey::Default => std::env::var(provider.default_api_key_env_var()).ok(),
            ApiKey::Custom(key) => Some(key.clone()),
        };

        key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            LlmError::ProviderConfiguration(format!(
                "{} not set.",
                provider.default_api_key_env_var()
            ))
        })
    }
}

pub struct LlmBuilder<State> {
    model: Option<String>,
    messages: Option<Vec<Message>>,
    generation_config: GenerationConfig,
    _state: PhantomData<State>,
}

impl<State> LlmBuilder<State> {
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.generation_config.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.generation_config.top_p = Some(top_p);
        self
    }

    fn into_state<Next>(self) -> LlmBuilder<Next> {
        LlmBuilder {
            model: self.model,
            messages: self.messages,
            generation_config: self.generation_config,
            _state: PhantomData,
        }
    }
}

impl LlmBuilder<Init> {
    pub fn model(mut self, model_id: &str) -> LlmBuilder<Configuring> {
        self.model = Some(model_id.to_string());
        self.into_state()
    }
}

impl LlmBuilder<Configuring> {
    pub fn messages(mut self, messages: Vec<Message>) -> LlmBuilder<MessagesSet> {
        self.messages = Some(messages);
        self.into_state()
    }
}

impl LlmBuilder<MessagesSet> {
    pub fn build(self) -> Result<TextRequest, LlmError> {
        let messages = self
            .messages
            .filter(|messages| !messages.is_empty())
            .ok_or(LlmError::Builder(
                "Missing messages. Make sure to add at least one message.".to_string(),
            ))?;

        let model = self
            .model
            .filter(|model| !model.trim().is_empty())
            .ok_or(LlmError::Builder(
                "Missing model. Make sure to specify a model.".into(),
            ))?;

        let generation_config = (self.generation_config != GenerationConfig::default())
            .then_some(self.generation_config);

        Ok(TextRequest {
            model,
            messages,
            generation_config,
        })
    }

    pub async fn send(self, generator: &dyn TextGenerator) -> Result<TextResponse, LlmError> {
        let request = self.build()?;
        generator.generate_text(request).await
    }
}

pub mod llm {
    use super::*;

    pub fn request() -> LlmBuilder<Init> {
        LlmBuilder {
            model: None,
            messages: None,
            generation_config: GenerationConfig::default(),
            _state: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_collects_generation_parameters() {
        let request = llm::request()
            .model("llama3-70b-8192")
            .messages(vec![Message::user("Olá")])
            .temperature(0.7)
            .max_tokens(1024)
            .top_p(1.0)
            .build()
            .unwrap();

        assert_eq!(request.model, "llama3-70b-8192");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(
            request.generation_config,
            Some(GenerationConfig {
                max_tokens: Some(1024),
                temperature: Some(0.7),
                top_p: Some(1.0),
            })
        );
    }

    #[test]
    fn build_without_parameters_omits_generation_config() {
        let request = llm::request()
            .model("llama3-70b-8192")
            .messages(vec![Message::user("Olá")])
            .build()
            .unwrap();

        assert!(request.generation_config.is_none());
    }

    #[test]
    fn build_rejects_empty_messages() {
        let result = llm::request().model("llama3-70b-8192").messages(vec![]).build();

        assert!(matches!(result, Err(LlmError::Builder(_))));
    }

    #[test]
    fn build_rejects_blank_model() {
        let result = llm::request()
            .model("  ")
            .messages(vec![Message::user("Olá")])
            .build();

        assert!(matches!(result, Err(LlmError::Builder(_))));
    }

    #[test]
    fn custom_api_key_must_not_be_blank() {
        let err = ApiKey::Custom(String::new())
            .resolve(Provider::Groq)
            .unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));

        let key = ApiKey::Custom("gsk_test".to_string())
            .resolve(Provider::Groq)
            .unwrap();
        assert_eq!(key, "gsk_test");
    }
}
