use std::sync::Arc;

use dotenv::dotenv;
use tourguide::{AppConfig, GroqClient, GuideService, OpenAiImageClient, web};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let text = GroqClient::new(config.groq.clone())?;
    let mut guide = GuideService::new(Arc::new(text), config.guide_settings());
    if let Some(openai) = config.openai.clone() {
        guide = guide.with_image_generator(Arc::new(OpenAiImageClient::new(openai)?));
    }

    let app = web::router(web::AppState::new(guide)?, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, model = %config.model, "serving travel guide");
    axum::serve(listener, app).await?;

    Ok(())
}
