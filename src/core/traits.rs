use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GeneratedImage, ImageRequest, TextRequest, TextResponse},
};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: TextRequest) -> Result<TextResponse, LlmError>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError>;
}
