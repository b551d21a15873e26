mod common;

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::{ScriptedGenerator, api_error};
use tourguide::{GuideService, GuideSettings, web};
use tower::ServiceExt;

fn app(generator: Arc<ScriptedGenerator>, assets: &std::path::Path) -> axum::Router {
    let guide = GuideService::new(generator, GuideSettings::default());
    web::router(web::AppState::new(guide).unwrap(), assets)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn submit(form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/guide")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[tokio::test]
async fn index_renders_the_empty_form() {
    let assets = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::answering(&[]));

    let response = app(generator.clone(), assets.path())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("<title>Guia Turístico IA</title>"));
    assert!(page.contains("🌴 Guia Turístico de Cidades Brasileiras"));
    assert!(page.contains("Digite uma cidade brasileira:"));
    assert!(page.contains(r#"value="Rio de Janeiro""#));
    assert!(page.contains("Desenvolvido com Groq (Llama 3) e OpenAI (DALL-E 3) | © 2024"));
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn submitting_the_form_renders_the_guide() {
    let assets = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::answering(&[
        "## Melhores Meses\nAbril a outubro.",
        "Na estação seca.",
        "- Pato no tucupi\n- Tacacá\n- Maniçoba",
    ]));

    let response = app(generator.clone(), assets.path())
        .oneshot(submit("city=Bel%C3%A9m&topic=Melhores+Meses"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("📌 Belém - Guia Completo"));
    assert!(page.contains("<h2>Melhores Meses</h2>"));
    assert!(page.contains("🗓️ Melhor época para visitar"));
    assert!(page.contains("Na estação seca."));
    assert!(page.contains("<li>Tacacá</li>"));
    assert!(page.contains(r#"<option value="Melhores Meses" selected>"#));
    assert!(!page.contains("Verifique suas chaves"));

    let requests = generator.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].messages[1].content.contains("sobre Melhores Meses"));
}

#[tokio::test]
async fn follow_up_failure_shows_error_and_hint() {
    let assets = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::new(vec![
        Ok("Cidade maravilhosa.".to_string()),
        Err(api_error(401, "Invalid API Key")),
    ]));

    let response = app(generator, assets.path())
        .oneshot(submit("city=Rio+de+Janeiro&topic=Cultura+Local"))
        .await
        .unwrap();

    let page = body_text(response).await;
    assert!(page.contains("Cidade maravilhosa."));
    assert!(page.contains("Erro ao gerar conteúdo: API error (401): Invalid API Key"));
    assert!(page.contains("Verifique suas chaves de API e conexão com a internet"));
    assert!(!page.contains("Pratos típicos para experimentar"));
}

#[tokio::test]
async fn city_input_is_escaped() {
    let assets = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::answering(&["a", "b", "c"]));

    let response = app(generator, assets.path())
        .oneshot(submit("city=%3Cb%3ENatal%3C%2Fb%3E&topic=Gastronomia"))
        .await
        .unwrap();

    let page = body_text(response).await;
    assert!(!page.contains("<b>Natal"));
    assert!(page.contains("&lt;b&gt;Natal"));
}

#[tokio::test]
async fn unknown_topic_is_rejected() {
    let assets = tempfile::tempdir().unwrap();
    let generator = Arc::new(ScriptedGenerator::answering(&[]));

    let response = app(generator.clone(), assets.path())
        .oneshot(submit("city=Natal&topic=Vida+Noturna"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn serves_static_assets_and_health() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("travel.png"), b"fake png").unwrap();
    let generator = Arc::new(ScriptedGenerator::answering(&[]));
    let app = app(generator, assets.path());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/img/travel.png").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "fake png");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "OK");
}
