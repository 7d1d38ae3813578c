//! Three-point business-strategy summaries from chat completions.
//!
//! `tripoint-rs` is the core library behind the tripoint service. It has
//! three parts, in dependency order:
//!
//! - [`OpenAiClient`] — an async HTTP client for the OpenAI chat completions
//!   API that returns tagged [`ApiError`](error::ApiError) kinds instead of
//!   stringly-typed failures, so callers map failures to status codes
//!   without sniffing message text;
//! - [`Summarizer`](summary::Summarizer) — the completion requester, which
//!   builds the fixed strategy prompt for a topic and fetches the raw
//!   completion text through a [`CompletionBackend`];
//! - [`extract_three_points`](extract::extract_three_points) — the point
//!   extractor, which turns whatever text the model produced into exactly
//!   three strings via a first-success-wins cascade of strategies.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use tripoint_rs::{DEFAULT_MODEL, OpenAiClient};
//! use tripoint_rs::summary::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tripoint_rs::error::ApiError> {
//!     let api_key = std::env::var("OPENAI_API_KEY").unwrap();
//!     let client = OpenAiClient::new(api_key)?;
//!
//!     let summarizer = Summarizer::new(Arc::new(client), DEFAULT_MODEL);
//!     let points = summarizer.summarize("direct-to-consumer coffee brands").await?;
//!     for point in &points {
//!         println!("- {point}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Every invocation is independent and stateless: construct the client once
//! at process start, share it via `Arc`, and call [`Summarizer::summarize`](summary::Summarizer::summarize)
//! per request. There is no conversation state, no caching, and no retry
//! logic — one failed call surfaces as one failed request.

pub mod error;
pub mod extract;
pub mod summary;

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

// ── Constants ──────────────────────────────────────────────────────

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for all LLM calls.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Carries only the fields this service
/// sends; the topic travels inside a message as JSON string data, so
/// arbitrary caller text never escapes into the transport framing.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`OpenAiClient::chat`].
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Backend seam ───────────────────────────────────────────────────

/// Boxed future returned by [`CompletionBackend::complete`].
///
/// Type alias to keep trait signatures and implementations readable.
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ChatCompletion, ApiError>> + Send + 'a>>;

/// Transport seam between the summarizer and the chat completions API.
///
/// [`OpenAiClient`] is the production implementation; tests substitute a
/// canned backend so no request leaves the process.
pub trait CompletionBackend: Send + Sync {
    /// Send one chat completion request.
    fn complete(&self, request: ChatRequest) -> CompletionFuture<'_>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the OpenAI chat completions API.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent("tripoint/0.1")
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, ApiError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(OPENAI_CHAT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response: {e}")))?;

        let elapsed = start.elapsed();
        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            elapsed.as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), text));
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: err.message,
            });
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());

        match choice {
            Some(c) => {
                let content_len = c.message.content.as_ref().map_or(0, |s| s.len());
                debug!("LLM output: {} chars text", content_len);
                Ok(ChatCompletion {
                    content: c.message.content,
                    usage: parsed.usage,
                    finish_reason: c.finish_reason,
                })
            }
            None => {
                debug!("LLM output: empty (no choices)");
                Ok(ChatCompletion {
                    content: None,
                    usage: parsed.usage,
                    finish_reason: None,
                })
            }
        }
    }
}

impl CompletionBackend for OpenAiClient {
    fn complete(&self, request: ChatRequest) -> CompletionFuture<'_> {
        Box::pin(async move { self.chat(&request).await })
    }
}
