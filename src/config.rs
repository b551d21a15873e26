//! Runtime configuration, read from the environment (and `.env`, loaded by the binary).

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::core::{ApiKey, HttpClientConfig, LlmError};
use crate::guide::GuideSettings;
use crate::provider::{GroqConfig, OpenAiConfig, Provider, groq_defaults};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub groq: GroqConfig,
    /// Only present when `OPENAI_API_KEY` is set.
    pub openai: Option<OpenAiConfig>,
    pub model: String,
    pub bind_addr: SocketAddr,
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = parse_or(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 60)?;
        let http_config = HttpClientConfig {
            timeout: Duration::from_secs(timeout_secs),
        };

        let groq_key = get(Provider::Groq.default_api_key_env_var()).unwrap_or_default();
        let mut groq = GroqConfig::new(ApiKey::Custom(groq_key).resolve(Provider::Groq)?)
            .with_http_config(http_config.clone());
        if let Some(base_url) = get("GROQ_BASE_URL") {
            groq = groq.with_base_url(base_url);
        }

        let openai = get(Provider::OpenAI.default_api_key_env_var()).map(|key| {
            let config = OpenAiConfig::new(key).with_http_config(http_config.clone());
            match get("OPENAI_BASE_URL") {
                Some(base_url) => config.with_base_url(base_url),
                None => config,
            }
        });

        Ok(Self {
            groq,
            openai,
            model: get("GUIDE_MODEL").unwrap_or_else(|| groq_defaults::DEFAULT_MODEL.to_string()),
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", default_bind_addr())?,
            assets_dir: get("ASSETS_DIR").map_or_else(|| PathBuf::from("img"), PathBuf::from),
            output_dir: get("OUTPUT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from),
        })
    }

    pub fn guide_settings(&self) -> GuideSettings {
        GuideSettings {
            model: self.model.clone(),
            output_dir: self.output_dir.clone(),
            ..GuideSettings::default()
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, LlmError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Invalid value for {key} ({raw:?}): {e}"))
        }),
    }
}
