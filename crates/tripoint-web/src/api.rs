//! REST endpoint handlers and error-to-status mapping.
//!
//! Validation failures and the missing-key configuration error are produced
//! here and never reach the core; upstream failures arrive as tagged
//! [`ApiError`] kinds and map to status codes without message sniffing.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::{info, warn};
use tripoint_rs::error::ApiError;
use tripoint_rs::summary::Summarizer;

/// Shared application state passed to all handlers via axum's `State`
/// extractor.
///
/// `summarizer` is `None` when the service was started without an API key;
/// requests then answer with the configuration error instead of reaching
/// the completion backend.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Option<Arc<Summarizer>>,
}

const VALIDATION_ERROR: &str =
    "Invalid request. Please provide a \"topic\" field as a non-empty string.";
const MISSING_KEY_ERROR: &str = "Server configuration error. OpenAI API key is missing.";
const INVALID_KEY_ERROR: &str = "Invalid API key configuration.";
const RATE_LIMIT_ERROR: &str = "Rate limit exceeded. Please try again later.";
const GENERIC_ERROR: &str = "An error occurred while generating the business strategy.";

fn error_body(status: StatusCode, error: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": error })))
}

/// The topic, if the body carries one as a non-empty string.
fn topic_from_body(body: &Value) -> Option<&str> {
    body.get("topic")?
        .as_str()
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
}

/// POST /summarize — generate a three-point strategy summary for a topic.
pub async fn post_summarize(
    State(app): State<AppState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(topic) = topic_from_body(&body) else {
        return error_body(StatusCode::BAD_REQUEST, VALIDATION_ERROR);
    };

    let Some(summarizer) = app.summarizer.as_ref() else {
        warn!("summarize request received but no API key is configured");
        return error_body(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_ERROR);
    };

    info!("generating summary for topic: {topic}");
    match summarizer.summarize(topic).await {
        Ok(points) => {
            let summary = Vec::from(points);
            // The extractor guarantees three points by construction;
            // re-check at the boundary so contract drift surfaces as a 500
            // instead of a malformed payload.
            if summary.len() != 3 {
                warn!("summary had {} points, expected 3", summary.len());
                return error_body(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR);
            }
            (StatusCode::OK, Json(json!({ "summary": summary })))
        }
        Err(err) => {
            warn!("summary generation failed: {err}");
            match err {
                ApiError::RateLimit(_) => {
                    error_body(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_ERROR)
                }
                ApiError::Auth(_) => {
                    error_body(StatusCode::INTERNAL_SERVER_ERROR, INVALID_KEY_ERROR)
                }
                _ => error_body(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR),
            }
        }
    }
}

/// GET /summarize — the endpoint is POST-only; answer with usage hints.
pub async fn get_summarize() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "Method not allowed. Please use POST.",
            "message": "This endpoint accepts POST requests with JSON body: {\"topic\": \"your topic here\"}",
        })),
    )
}
