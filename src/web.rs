//! The single-page form, served with axum.

mod render;

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::guide::{GuideService, Topic};
pub use render::{DEFAULT_CITY, Pages, markdown_to_html};

#[derive(Clone)]
pub struct AppState {
    guide: Arc<GuideService>,
    pages: Arc<Pages>,
}

impl AppState {
    pub fn new(guide: GuideService) -> Result<Self, WebError> {
        Ok(Self {
            guide: Arc::new(guide),
            pages: Arc::new(Pages::new()?),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("failed to render page: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct GuideForm {
    pub city: String,
    pub topic: Topic,
}

pub fn router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/guide", get(index).post(create_guide))
        .route("/health", get(health))
        .nest_service("/img", ServeDir::new(assets_dir.as_ref()))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    Ok(Html(state.pages.form(DEFAULT_CITY, Topic::default())?))
}

async fn create_guide(
    State(state): State<AppState>,
    Form(form): Form<GuideForm>,
) -> Result<Html<String>, WebError> {
    let city = form.city.trim();
    tracing::info!(city, topic = %form.topic, "building guide");

    let guide = state.guide.build_guide(city, form.topic).await;
    Ok(Html(state.pages.guide(&guide)?))
}
