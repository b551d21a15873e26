#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tourguide::{
    LlmError, Provider, TextGenerator, TextRequest, TextResponse,
    core::ResponseMetadata,
};

/// Answers each request with the next scripted reply and records what it was asked.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<TextRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, request: TextRequest) -> Result<TextResponse, LlmError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        let text = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Builder("no scripted reply left".to_string())))?;

        Ok(TextResponse {
            text,
            usage: None,
            metadata: ResponseMetadata {
                provider: Provider::Groq,
                model,
                id: "scripted".to_string(),
            },
        })
    }
}

pub fn api_error(status: u16, message: &str) -> LlmError {
    LlmError::Api {
        message: message.to_string(),
        status_code: Some(status),
        source: None,
    }
}
