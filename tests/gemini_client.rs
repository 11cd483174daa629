use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use nutrivision::{
    analysis::{
        prompt::NUTRITION_PROMPT, AnalysisRequest, FailureKind, ImageMime, ImagePayload,
        UploadedImage,
    },
    models::{GenerationConfig, ModelParams},
    AnalysisOutcome, ApiKey, GenerativeModel, MealAnalyzer, NutriVisionError, VisionModel,
};
use serde_json::{json, Value};

const API_KEY: &str = "test-key-123";

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    reply: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(target): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    fake.captured.lock().unwrap().push(Captured {
        target,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (
        fake.status,
        [(header::CONTENT_TYPE, "application/json")],
        fake.reply.clone(),
    )
}

/// Starts a stand-in for the Gemini endpoint and returns its base URL.
async fn spawn_gemini(status: StatusCode, reply: impl Into<String>) -> (String, FakeGemini) {
    let fake = FakeGemini {
        status,
        reply: reply.into(),
        captured: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1beta/models/{target}", post(generate_content))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), fake)
}

fn model(base_url: &str) -> GenerativeModel {
    GenerativeModel::new(
        ApiKey::new(API_KEY).unwrap(),
        ModelParams::builder()
            .model("gemini-test")
            .base_url(base_url)
            .build(),
    )
}

fn captured(fake: &FakeGemini) -> Vec<Captured> {
    fake.captured.lock().unwrap().clone()
}

fn text_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 300, "candidatesTokenCount": 40, "totalTokenCount": 340},
        "modelVersion": "gemini-test"
    })
    .to_string()
}

#[tokio::test]
async fn sends_prompt_and_inline_png_in_one_call() {
    let (base_url, fake) = spawn_gemini(StatusCode::OK, text_reply("Rice - 200 kcal")).await;
    let png = b"\x89PNG\r\n\x1a\nmeal";
    let request = AnalysisRequest::new(ImagePayload::new(ImageMime::Png, png.to_vec()), None);

    let text = model(&base_url).describe_image(&request).await.unwrap();

    assert_eq!(text, "Rice - 200 kcal");
    let calls = captured(&fake);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target, "gemini-test:generateContent");
    assert_eq!(calls[0].api_key.as_deref(), Some(API_KEY));
    assert_eq!(
        calls[0].body,
        json!({
            "contents": [{
                "parts": [
                    {"text": NUTRITION_PROMPT},
                    {"inline_data": {"mime_type": "image/png", "data": STANDARD.encode(png)}}
                ]
            }]
        })
    );
}

#[tokio::test]
async fn generation_config_from_params_is_sent() {
    let (base_url, fake) = spawn_gemini(StatusCode::OK, text_reply("ok")).await;
    let model = GenerativeModel::new(
        ApiKey::new(API_KEY).unwrap(),
        ModelParams::builder()
            .model("gemini-test")
            .base_url(base_url.as_str())
            .generation_config(Some(
                GenerationConfig::builder()
                    .temperature(0.5)
                    .max_output_tokens(2048)
                    .build(),
            ))
            .build(),
    );
    let request = AnalysisRequest::new(ImagePayload::new(ImageMime::Jpeg, vec![1]), None);

    model.describe_image(&request).await.unwrap();

    assert_eq!(
        captured(&fake)[0].body["generation_config"],
        json!({"temperature": 0.5, "maxOutputTokens": 2048})
    );
}

#[tokio::test]
async fn api_errors_surface_status_and_message_but_not_the_key() {
    let (base_url, _) = spawn_gemini(
        StatusCode::FORBIDDEN,
        json!({
            "error": {"code": 403, "message": "API key not valid. Please pass a valid API key.", "status": "PERMISSION_DENIED"}
        })
        .to_string(),
    )
    .await;
    let request = AnalysisRequest::new(ImagePayload::new(ImageMime::Jpeg, vec![1]), None);

    let err = model(&base_url).describe_image(&request).await.unwrap_err();

    match &err {
        NutriVisionError::ApiError { status, message } => {
            assert_eq!(*status, StatusCode::FORBIDDEN);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn analyzer_reports_external_failures() {
    let (base_url, _) = spawn_gemini(StatusCode::OK, "this is not json").await;
    let analyzer = MealAnalyzer::new(model(&base_url));

    let outcome = analyzer
        .analyze(Some(UploadedImage::new("image/jpeg", vec![0xff, 0xd8])), "")
        .await;

    match outcome {
        AnalysisOutcome::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::ExternalService);
            assert!(failure
                .message
                .starts_with("An error occurred while analyzing the image: JSON parsing error"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn analyzer_reports_blocked_prompt_as_empty() {
    let (base_url, fake) = spawn_gemini(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
    )
    .await;
    let analyzer = MealAnalyzer::new(model(&base_url));

    let outcome = analyzer
        .analyze(Some(UploadedImage::new("image/png", vec![1, 2, 3])), "  ")
        .await;

    assert_eq!(outcome, AnalysisOutcome::Empty);
    assert_eq!(captured(&fake)[0].body["contents"][0]["parts"][0]["text"], NUTRITION_PROMPT);
}

#[tokio::test]
async fn unreachable_service_is_an_external_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let analyzer = MealAnalyzer::new(model(&base_url));

    let outcome = analyzer
        .analyze(Some(UploadedImage::new("image/png", vec![1])), "")
        .await;

    assert!(matches!(
        outcome,
        AnalysisOutcome::Failure(ref failure) if failure.kind == FailureKind::ExternalService
    ));
}
