pub mod builder;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use builder::{ApiKey, llm};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::{ImageGenerator, TextGenerator};
pub use types::{
    ChatRole, GeneratedImage, GenerationConfig, ImageRequest, LanguageModelUsage, Message,
    ResponseMetadata, TextRequest, TextResponse,
};
