//! Completion requester: the fixed strategy prompt and the summarizer that
//! drives it through a [`CompletionBackend`].

use std::sync::Arc;

use tracing::debug;

use crate::error::ApiError;
use crate::extract::{StrategyPoints, extract_three_points};
use crate::{ChatRequest, CompletionBackend, DEFAULT_MODEL, Message};

/// System message framing the assistant for every request.
pub const SYSTEM_PROMPT: &str =
    "You are a business strategy expert. Provide clear, actionable, and strategic business advice.";

/// Substituted when the API returns no completion content, so the extractor
/// always has input to work with.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated";

/// Completion cap for one summary.
pub const SUMMARY_MAX_TOKENS: u32 = 500;

/// Sampling temperature for summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// Build the user prompt for a topic.
///
/// The topic is embedded verbatim — it travels to the API as JSON string
/// data, so no escaping beyond serde's is needed.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Generate a three-point business strategy summary for the topic: \"{topic}\".\n\n\
         Please provide exactly three concise, actionable business strategy points. \
         Each point should be a complete sentence that offers strategic insight or actionable advice.\n\n\
         Format your response as three distinct points, numbered 1, 2, and 3."
    )
}

/// Requests strategy summaries from a completion backend and extracts the
/// three points.
///
/// Holds an explicitly constructed backend — construct once at process
/// start and share via `Arc`. Every call is independent: no conversation
/// state, no caching, no retries.
pub struct Summarizer {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl Summarizer {
    /// Create a summarizer over the given backend and model identifier.
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Create a summarizer using [`DEFAULT_MODEL`].
    pub fn with_default_model(backend: Arc<dyn CompletionBackend>) -> Self {
        Self::new(backend, DEFAULT_MODEL)
    }

    /// Fetch the raw completion text for a topic.
    ///
    /// The topic must be non-empty after trimming — callers validate before
    /// invoking. Transport failures propagate untouched; a response with no
    /// content becomes [`NO_RESPONSE_PLACEHOLDER`] instead of an error.
    pub async fn request_completion(&self, topic: &str) -> Result<String, ApiError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(build_prompt(topic)),
            ],
            max_tokens: SUMMARY_MAX_TOKENS,
            temperature: SUMMARY_TEMPERATURE,
        };

        let completion = self.backend.complete(request).await?;

        Ok(completion
            .content
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()))
    }

    /// Generate the three-point summary for a topic.
    pub async fn summarize(&self, topic: &str) -> Result<StrategyPoints, ApiError> {
        debug!("requesting strategy summary for topic: {topic}");
        let raw = self.request_completion(topic).await?;
        Ok(extract_three_points(&raw))
    }
}
