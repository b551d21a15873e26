use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM-Builder error: {0}")]
    Builder(String),

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("API error{}: {message}", status_suffix(.status_code))]
    Api {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Image error: {message}")]
    Image {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: BoxedSource,
    },
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map(|code| format!(" ({code})")).unwrap_or_default()
}

impl LlmError {
    /// HTTP status returned by the provider, if the failure came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
