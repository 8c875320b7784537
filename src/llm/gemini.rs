//! Google Gemini backend
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`).
//! The API key is sent in the `x-goog-api-key` header so it never shows up in
//! URLs or request logs.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{GenerativeModel, LlmError, ModelFactory};

/// Default base URL for the Gemini API
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Shared Gemini client holding the credential and HTTP connection pool
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl ModelFactory for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn create_model(&self, model_name: &str) -> Result<Box<dyn GenerativeModel>, LlmError> {
        validate_model_name(model_name)?;
        Ok(Box::new(GeminiModel {
            client: self.clone(),
            model: model_name.to_string(),
        }))
    }
}

/// Model names end up in the request path, so only path-safe names are accepted
fn validate_model_name(model_name: &str) -> Result<(), LlmError> {
    let valid = !model_name.is_empty()
        && model_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
    if valid {
        Ok(())
    } else {
        Err(LlmError::InvalidModel(model_name.to_string()))
    }
}

/// Handle for one Gemini model
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.client.generate_url(&self.model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.client.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(map_api_error(status.as_u16(), &response_text));
        }

        let text = extract_text(&response_text)?;
        debug!(response_len = text.len(), "Received Gemini response");
        Ok(text)
    }
}

fn build_request(prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![ContentPart {
                text: Some(prompt.to_string()),
            }],
        }],
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response_text: &str) -> Result<String, LlmError> {
    let response: GeminiResponse = serde_json::from_str(response_text).map_err(|e| {
        error!(error = %e, response = %response_text, "Failed to parse Gemini response");
        LlmError::MalformedResponse(format!("invalid JSON: {}", e))
    })?;

    if let Some(err) = response.error {
        return Err(LlmError::Api {
            status: 200,
            message: err.message,
        });
    }

    let candidate = match response.candidates.as_ref().and_then(|c| c.first()) {
        Some(c) => c,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(LlmError::MalformedResponse(format!(
                "no content in response ({})",
                reason
            )));
        }
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(LlmError::MalformedResponse(format!(
            "empty candidate (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

fn map_api_error(status: u16, response_text: &str) -> LlmError {
    let message = serde_json::from_str::<GeminiResponse>(response_text)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| response_text.to_string(), |e| e.message);

    match status {
        401 | 403 => LlmError::Unauthorized(message),
        429 => LlmError::RateLimited(quota_message(&message)),
        _ => LlmError::Api { status, message },
    }
}

/// Turn "... Please retry in 6.40s." into a friendlier quota message
fn quota_message(message: &str) -> String {
    const RETRY_PREFIX: &str = "Please retry in ";

    if let Some(pos) = message.find(RETRY_PREFIX) {
        let after = &message[pos + RETRY_PREFIX.len()..];
        if let Some(s_pos) = after.find('s') {
            if let Ok(seconds) = after[..s_pos].parse::<f64>() {
                return format!(
                    "AI service quota exceeded. Please try again in {} seconds.",
                    seconds.ceil() as u64
                );
            }
        }
    }

    "AI service quota exceeded. Please wait a moment and try again.".to_string()
}
