use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use tracing::{info, warn};

use super::{Topic, prompt};
use crate::core::{
    GeneratedImage, ImageGenerator, ImageRequest, LlmError, Message, TextGenerator, llm,
};
use crate::provider::{groq_defaults, openai_defaults};

#[derive(Debug, Clone)]
pub struct GuideSettings {
    pub model: String,
    pub image_model: String,
    pub image_size: String,
    /// Directory the vacation illustration is written to.
    pub output_dir: PathBuf,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            model: groq_defaults::DEFAULT_MODEL.to_string(),
            image_model: openai_defaults::DEFAULT_IMAGE_MODEL.to_string(),
            image_size: openai_defaults::DEFAULT_IMAGE_SIZE.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of the description call. A failure here is shown inline and does
/// not stop the rest of the guide.
#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    Text(String),
    Failed(String),
}

impl Description {
    fn from_result(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => Description::Text(text),
            Err(e) => {
                warn!(error = %e, "city description failed");
                Description::Failed(format!("Erro ao gerar descrição com Groq: {e}"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityGuide {
    pub city: String,
    pub topic: Topic,
    pub description: Description,
    pub best_season: Option<String>,
    pub dishes: Option<String>,
    /// Set when a follow-up call failed; sections after it are missing.
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Illustration {
    pub image_path: PathBuf,
    pub description: Description,
}

pub struct GuideService {
    text: Arc<dyn TextGenerator>,
    images: Option<Arc<dyn ImageGenerator>>,
    settings: GuideSettings,
}

impl GuideService {
    pub fn new(text: Arc<dyn TextGenerator>, settings: GuideSettings) -> Self {
        Self {
            text,
            images: None,
            settings,
        }
    }

    pub fn with_image_generator(mut self, images: Arc<dyn ImageGenerator>) -> Self {
        self.images = Some(images);
        self
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn describe_city(&self, city: &str, topic: Topic) -> Result<String, LlmError> {
        let response = llm::request()
            .model(&self.settings.model)
            .messages(vec![
                Message::system(prompt::TOUR_GUIDE_SYSTEM_PROMPT),
                Message::user(prompt::city_description(city, topic)),
            ])
            .temperature(0.7)
            .max_tokens(1024)
            .top_p(1.0)
            .send(self.text.as_ref())
            .await?;

        Ok(response.text)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn best_season(&self, city: &str) -> Result<String, LlmError> {
        self.ask(prompt::best_season(city), 150).await
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn typical_dishes(&self, city: &str) -> Result<String, LlmError> {
        self.ask(prompt::typical_dishes(city), 200).await
    }

    async fn ask(&self, question: String, max_tokens: u32) -> Result<String, LlmError> {
        let response = llm::request()
            .model(&self.settings.model)
            .messages(vec![Message::user(question)])
            .max_tokens(max_tokens)
            .send(self.text.as_ref())
            .await?;

        Ok(response.text)
    }

    /// Run the description, best season and typical dishes calls in order.
    #[tracing::instrument(skip(self))]
    pub async fn build_guide(&self, city: &str, topic: Topic) -> CityGuide {
        let mut guide = CityGuide {
            city: city.to_string(),
            topic,
            description: Description::from_result(self.describe_city(city, topic).await),
            best_season: None,
            dishes: None,
            failure: None,
        };

        match self.best_season(city).await {
            Ok(text) => guide.best_season = Some(text),
            Err(e) => return guide.abort(e),
        }

        match self.typical_dishes(city).await {
            Ok(text) => guide.dishes = Some(text),
            Err(e) => return guide.abort(e),
        }

        info!(city, %topic, "guide generated");
        guide
    }

    /// Generate the pop-art vacation illustration, save it as
    /// `{city}_vacation.png` under the output directory, then describe the city.
    #[tracing::instrument(skip(self), err)]
    pub async fn illustrate(&self, city: &str, topic: Topic) -> Result<Illustration, LlmError> {
        let images = self.images.as_ref().ok_or_else(|| {
            LlmError::ProviderConfiguration(
                "No image generator configured. Set OPENAI_API_KEY to enable illustrations."
                    .to_string(),
            )
        })?;

        let image = images
            .generate_image(ImageRequest {
                model: self.settings.image_model.clone(),
                prompt: prompt::vacation_image(city),
                size: self.settings.image_size.clone(),
                n: 1,
            })
            .await?;

        let image_path = self.settings.output_dir.join(vacation_file_name(city));
        save_png(image, image_path.clone()).await?;
        info!(path = %image_path.display(), "illustration saved");

        let description = Description::from_result(self.describe_city(city, topic).await);

        Ok(Illustration {
            image_path,
            description,
        })
    }
}

impl CityGuide {
    fn abort(mut self, error: LlmError) -> Self {
        warn!(city = %self.city, error = %error, "guide generation stopped");
        self.failure = Some(format!("Erro ao gerar conteúdo: {error}"));
        self
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && matches!(self.description, Description::Text(_))
    }
}

/// Path separators in the city name are replaced so the file stays inside the
/// output directory.
fn vacation_file_name(city: &str) -> String {
    let city: String = city
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{city}_vacation.png")
}

async fn save_png(image: GeneratedImage, path: PathBuf) -> Result<(), LlmError> {
    tokio::task::spawn_blocking(move || write_png(&image.bytes, &path))
        .await
        .map_err(|e| LlmError::Storage {
            message: "Image writer task failed".to_string(),
            source: Box::new(e),
        })?
}

fn write_png(bytes: &[u8], path: &Path) -> Result<(), LlmError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| LlmError::Image {
        message: "Failed to decode generated image".to_string(),
        source: Box::new(e),
    })?;

    decoded
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| LlmError::Storage {
            message: format!("Failed to save image to {}", path.display()),
            source: Box::new(e),
        })
}
