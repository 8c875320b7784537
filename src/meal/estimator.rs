//! Meal calorie estimator
//!
//! One estimation is: check the credential, check the input, construct a
//! model handle (falling back through the configured model names if
//! construction fails), make exactly one generation call, then parse the reply.
//! A failed generation call is never retried on another model.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::error::EstimationError;
use super::parse::{parse_calories, ParsedCalories, MAX_MEAL_CALORIES};
use super::prompt::build_prompt;
use crate::config::CalorieConfig;
use crate::llm::{GeminiClient, GenerativeModel, LlmError, ModelFactory};

/// Model fallback order used when none is configured
pub const DEFAULT_MODELS: &[&str] = &["gemini-2.0-flash-exp", "gemini-1.5-flash", "gemini-1.5-pro"];

/// Estimates meal intake calories through a generative backend
///
/// Holds no per-request state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct MealCalorieEstimator {
    factory: Option<Arc<dyn ModelFactory>>,
    models: Vec<String>,
}

impl MealCalorieEstimator {
    pub fn new(factory: Arc<dyn ModelFactory>) -> Self {
        Self {
            factory: Some(factory),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// An estimator with no backend; every call fails with `NotConfigured`
    pub fn unconfigured() -> Self {
        Self {
            factory: None,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Build a Gemini-backed estimator, or an unconfigured one if no key is set
    pub fn from_config(config: &CalorieConfig) -> Self {
        let estimator = match &config.api_key {
            Some(key) => {
                let client = GeminiClient::new(key.clone()).with_base_url(&config.api_base_url);
                Self::new(Arc::new(client))
            }
            None => {
                warn!("GEMINI_API_KEY is not set; meal calorie estimation is disabled");
                Self::unconfigured()
            }
        };
        estimator.with_models(config.models.iter().cloned())
    }

    pub fn is_configured(&self) -> bool {
        self.factory.is_some()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Estimate the calories of a meal description
    pub async fn estimate_meal_calories(&self, description: &str) -> Result<u32, EstimationError> {
        self.estimate_with_cancel(description, std::future::pending()).await
    }

    /// Estimate, giving up with `TimedOut` once `timeout` elapses
    pub async fn estimate_with_timeout(
        &self,
        description: &str,
        timeout: Duration,
    ) -> Result<u32, EstimationError> {
        match tokio::time::timeout(timeout, self.estimate_meal_calories(description)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Meal calorie estimation timed out");
                Err(EstimationError::TimedOut(timeout))
            }
        }
    }

    /// Estimate, giving up with `Cancelled` as soon as `cancel` completes
    pub async fn estimate_with_cancel<F>(
        &self,
        description: &str,
        cancel: F,
    ) -> Result<u32, EstimationError>
    where
        F: Future<Output = ()>,
    {
        let factory = self.factory.as_ref().ok_or_else(|| {
            error!("Meal calorie estimation requested but GEMINI_API_KEY is not set");
            EstimationError::NotConfigured
        })?;

        let description = description.trim();
        if description.is_empty() {
            warn!("Meal description is empty");
            return Err(EstimationError::EmptyDescription);
        }

        info!(description_len = description.len(), "Estimating meal calories");

        let model = self.select_model(factory.as_ref())?;
        let model_name = model.model_name().to_string();
        let prompt = build_prompt(description);

        debug!(model = %model_name, prompt_len = prompt.len(), "Calling generative backend");

        let text = tokio::select! {
            result = model.generate(&prompt) => result.map_err(|source| {
                error!(model = %model_name, category = source.category(), error = %source, "Generative backend call failed");
                EstimationError::Backend { model: model_name.clone(), source }
            })?,
            _ = cancel => {
                warn!(model = %model_name, "Meal calorie estimation cancelled");
                return Err(EstimationError::Cancelled);
            }
        };

        debug!(model = %model_name, raw = %text, "Raw backend response");

        match parse_calories(&text) {
            ParsedCalories::Valid(kcal) => {
                info!(model = %model_name, kcal, "Meal calories estimated");
                Ok(kcal)
            }
            ParsedCalories::NoNumber => {
                error!(model = %model_name, raw = %text, "No number in backend response");
                Err(EstimationError::NoNumber { model: model_name, raw: text })
            }
            ParsedCalories::OutOfRange(value) => {
                error!(model = %model_name, value, raw = %text, "Estimated calories out of range");
                Err(EstimationError::OutOfRange {
                    model: model_name,
                    value,
                    max: MAX_MEAL_CALORIES,
                    raw: text,
                })
            }
        }
    }

    /// First model that constructs successfully, in configured order
    fn select_model(
        &self,
        factory: &dyn ModelFactory,
    ) -> Result<Box<dyn GenerativeModel>, EstimationError> {
        let mut last_error: Option<LlmError> = None;

        for name in &self.models {
            match factory.create_model(name) {
                Ok(model) => {
                    debug!(provider = factory.provider_name(), model = %name, "Model initialized");
                    return Ok(model);
                }
                Err(e) => {
                    warn!(model = %name, error = %e, "Model initialization failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        error!(tried = ?self.models, "No model could be initialized");
        Err(EstimationError::NoModelAvailable {
            tried: self.models.clone(),
            last_error,
        })
    }
}
