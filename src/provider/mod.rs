mod constants;
pub(crate) mod groq;
pub(crate) mod openai;

pub use constants::{groq as groq_defaults, openai as openai_defaults};
pub use groq::{GroqClient, GroqConfig};
pub use openai::{OpenAiConfig, OpenAiImageClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
            Provider::OpenAI => write!(f, "OpenAI"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::API_KEY_ENV_VAR,
            Provider::OpenAI => constants::openai::API_KEY_ENV_VAR,
        }
    }
}
