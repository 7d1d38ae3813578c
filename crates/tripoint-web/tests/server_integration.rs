//! Integration tests for the tripoint-web server.
//!
//! These tests start a real axum server on a random port and exercise the
//! summarize endpoint with a canned completion backend — no request ever
//! leaves the process.

use std::sync::Arc;

use tripoint_rs::error::ApiError;
use tripoint_rs::summary::Summarizer;
use tripoint_rs::{ChatCompletion, ChatRequest, CompletionBackend, CompletionFuture};
use tripoint_web::{AppState, WebConfig, spawn_web};

/// Backend that answers every request with a fixed result.
struct CannedBackend {
    response: Result<Option<String>, ApiError>,
}

impl CannedBackend {
    fn content(text: &str) -> Self {
        Self {
            response: Ok(Some(text.to_string())),
        }
    }

    fn empty() -> Self {
        Self { response: Ok(None) }
    }

    fn failure(err: ApiError) -> Self {
        Self { response: Err(err) }
    }
}

impl CompletionBackend for CannedBackend {
    fn complete(&self, _request: ChatRequest) -> CompletionFuture<'_> {
        let response = self.response.clone();
        Box::pin(async move {
            response.map(|content| ChatCompletion {
                content,
                usage: None,
                finish_reason: Some("stop".to_string()),
            })
        })
    }
}

/// Helper: spawn a test server on port 0 (random available port) backed by
/// the given canned backend.
async fn spawn_test_server(backend: CannedBackend) -> String {
    let summarizer = Arc::new(Summarizer::with_default_model(Arc::new(backend)));
    spawn_with_state(AppState {
        summarizer: Some(summarizer),
    })
    .await
}

async fn spawn_with_state(state: AppState) -> String {
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(state, config).await;
    format!("http://{addr}")
}

// ── Happy path ───────────────────────────────────────────────────────

#[tokio::test]
async fn summarize_returns_three_points() {
    let base = spawn_test_server(CannedBackend::content(
        "1. Focus on brand story.\n2. Optimize subscription retention.\n3. Expand into wholesale.",
    ))
    .await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "direct-to-consumer coffee brands"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json["summary"],
        serde_json::json!([
            "Focus on brand story.",
            "Optimize subscription retention.",
            "Expand into wholesale.",
        ])
    );
}

#[tokio::test]
async fn bulleted_completion_still_yields_three_points() {
    let base = spawn_test_server(CannedBackend::content(
        "- Build a moat.\n- Charge more.\n- Ship faster.",
    ))
    .await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "saas pricing"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["summary"].as_array().unwrap().len(), 3);
    assert_eq!(json["summary"][0], "Build a moat.");
}

#[tokio::test]
async fn empty_completion_degrades_to_placeholder_thirds() {
    // No content from the model becomes the placeholder text, which the
    // extractor still splits into three strings.
    let base = spawn_test_server(CannedBackend::empty()).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "anything"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["summary"], serde_json::json!(["No", "response", "generated"]));
}

// ── Validation ───────────────────────────────────────────────────────

#[tokio::test]
async fn missing_topic_is_rejected() {
    let base = spawn_test_server(CannedBackend::content("unused")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("topic"));
}

#[tokio::test]
async fn blank_topic_is_rejected() {
    let base = spawn_test_server(CannedBackend::content("unused")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn non_string_topic_is_rejected() {
    let base = spawn_test_server(CannedBackend::content("unused")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": 42}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

// ── Error mapping ────────────────────────────────────────────────────

#[tokio::test]
async fn rate_limited_backend_maps_to_429() {
    let base = spawn_test_server(CannedBackend::failure(ApiError::RateLimit(
        "rate limit exceeded".into(),
    )))
    .await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 429);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Rate limit exceeded. Please try again later.");
}

#[tokio::test]
async fn auth_failure_maps_to_500_with_key_message() {
    let base =
        spawn_test_server(CannedBackend::failure(ApiError::Auth("bad key".into()))).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Invalid API key configuration.");
}

#[tokio::test]
async fn transport_failure_maps_to_generic_500() {
    let base = spawn_test_server(CannedBackend::failure(ApiError::Transport(
        "connection refused".into(),
    )))
    .await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json["error"],
        "An error occurred while generating the business strategy."
    );
}

#[tokio::test]
async fn missing_api_key_maps_to_configuration_500() {
    let base = spawn_with_state(AppState { summarizer: None }).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"topic": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json["error"],
        "Server configuration error. OpenAI API key is missing."
    );
}

// ── Method handling ──────────────────────────────────────────────────

#[tokio::test]
async fn get_summarize_is_405_with_usage_hints() {
    let base = spawn_test_server(CannedBackend::content("unused")).await;

    let resp = reqwest::get(format!("{base}/summarize")).await.unwrap();
    assert_eq!(resp.status(), 405);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Method not allowed. Please use POST.");
    assert!(json["message"].as_str().unwrap().contains("POST"));
}

// ── Static test form ─────────────────────────────────────────────────

#[tokio::test]
async fn static_dir_serves_test_form() {
    let summarizer = Arc::new(Summarizer::with_default_model(Arc::new(
        CannedBackend::content("unused"),
    )));
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        static_dir: Some("static".into()),
    };
    let addr = spawn_web(
        AppState {
            summarizer: Some(summarizer),
        },
        config,
    )
    .await;

    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Enter a topic"));
}
