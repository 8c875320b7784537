//! Generative-language backends
//!
//! The estimator talks to a backend through two seams:
//!
//! - [`ModelFactory`] builds a handle for a named model. This is local work
//!   (no network) and is where an unknown or unusable model name fails.
//! - [`GenerativeModel`] performs the actual generation call.
//!
//! Keeping the two apart lets the estimator fall back to another model name
//! when construction fails without ever retrying a failed generation.

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::{GeminiClient, GeminiModel};

/// Errors raised by a generative backend
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Invalid model name: {0}")]
    InvalidModel(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Credential rejected by backend: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Short machine-readable category for logs and tool responses
    pub fn category(&self) -> &'static str {
        match self {
            LlmError::InvalidModel(_) => "invalid_model",
            LlmError::Transport(_) => "transport",
            LlmError::Unauthorized(_) => "unauthorized",
            LlmError::RateLimited(_) => "rate_limited",
            LlmError::Api { .. } => "api",
            LlmError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// A constructed handle to one backend model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// Send a prompt and return the raw response text
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Builds model handles by name
pub trait ModelFactory: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Construct a handle for `model_name` without touching the network
    fn create_model(&self, model_name: &str) -> Result<Box<dyn GenerativeModel>, LlmError>;
}
