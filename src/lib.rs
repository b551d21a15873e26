//! # tourguide
//!
//! A one-page travel guide for Brazilian cities. The visitor picks a city and a
//! topic; the page asks a hosted LLM (Groq, OpenAI-compatible chat completions)
//! for a short description, the best season to visit and three typical dishes,
//! and renders the answers next to a static illustration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourguide::{ApiKey, GroqClient, GroqConfig, GuideService, GuideSettings, Topic};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new(GroqConfig::from_api_key(ApiKey::Default)?)?;
//!     let guide = GuideService::new(Arc::new(client), GuideSettings::default())
//!         .build_guide("Salvador", Topic::Gastronomia)
//!         .await;
//!     println!("{:?}", guide.dishes);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod guide;
pub mod provider;
pub mod web;

pub use config::AppConfig;
pub use crate::core::{
    ApiKey, ChatRole, ImageGenerator, LlmError, Message, TextGenerator, TextRequest, TextResponse,
    llm,
};
pub use guide::{CityGuide, Description, GuideService, GuideSettings, Illustration, Topic};
pub use provider::{GroqClient, GroqConfig, OpenAiConfig, OpenAiImageClient, Provider};
