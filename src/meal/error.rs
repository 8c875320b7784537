//! Estimation error taxonomy

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::llm::LlmError;

/// Broad failure class shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Feature disabled: no credential or no usable model
    Configuration,
    /// Bad input from the caller
    Validation,
    /// Feature broken for this request: backend failed or gave an unusable answer
    Backend,
}

/// Why a meal estimate could not be produced
#[derive(Debug, Error)]
pub enum EstimationError {
    #[error("Calorie estimation is not configured: GEMINI_API_KEY is not set")]
    NotConfigured,

    #[error("Meal description is empty")]
    EmptyDescription,

    #[error("No usable model among [{}]", .tried.join(", "))]
    NoModelAvailable {
        tried: Vec<String>,
        #[source]
        last_error: Option<LlmError>,
    },

    #[error("Backend call to {model} failed: {source}")]
    Backend {
        model: String,
        #[source]
        source: LlmError,
    },

    #[error("No number found in response from {model}: {raw:?}")]
    NoNumber { model: String, raw: String },

    #[error("Estimated value {value} from {model} is outside 0..={max}")]
    OutOfRange {
        model: String,
        value: u64,
        max: u64,
        raw: String,
    },

    #[error("Estimation cancelled")]
    Cancelled,

    #[error("Estimation timed out after {0:?}")]
    TimedOut(Duration),
}

impl EstimationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            EstimationError::NotConfigured | EstimationError::NoModelAvailable { .. } => {
                FailureKind::Configuration
            }
            EstimationError::EmptyDescription => FailureKind::Validation,
            EstimationError::Backend { .. }
            | EstimationError::NoNumber { .. }
            | EstimationError::OutOfRange { .. }
            | EstimationError::Cancelled
            | EstimationError::TimedOut(_) => FailureKind::Backend,
        }
    }

    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            EstimationError::NotConfigured => "not_configured",
            EstimationError::EmptyDescription => "empty_description",
            EstimationError::NoModelAvailable { .. } => "no_model_available",
            EstimationError::Backend { .. } => "backend_error",
            EstimationError::NoNumber { .. } => "no_number",
            EstimationError::OutOfRange { .. } => "out_of_range",
            EstimationError::Cancelled => "cancelled",
            EstimationError::TimedOut(_) => "timed_out",
        }
    }

    /// Text suitable for showing next to the meal field
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::Configuration => {
                "Calorie estimation is not available: the service is not configured."
            }
            FailureKind::Validation => "Please enter a meal description.",
            FailureKind::Backend => {
                "Could not compute calories for this meal. You can save the record without them."
            }
        }
    }

    /// Raw backend response text, when the failure came from reading one
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            EstimationError::NoNumber { raw, .. } | EstimationError::OutOfRange { raw, .. } => {
                Some(raw.as_str())
            }
            _ => None,
        }
    }
}
