//! Configuration
//!
//! Read once from the environment at startup and passed explicitly to the
//! pieces that need it.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::llm::gemini::DEFAULT_API_BASE_URL;
use crate::meal::DEFAULT_MODELS;

/// Credential for the Gemini backend
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Comma-separated model fallback list
pub const MODELS_ENV: &str = "RUN_CALORIES_MODELS";
/// Request-level timeout for one estimation, in seconds (0 disables)
pub const TIMEOUT_ENV: &str = "RUN_CALORIES_TIMEOUT_SECS";
/// Backend base URL override
pub const BASE_URL_ENV: &str = "GEMINI_API_BASE_URL";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const KEY_PREVIEW_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct CalorieConfig {
    /// `None` when the credential is absent or blank
    pub api_key: Option<String>,
    pub models: Vec<String>,
    /// `None` means no host-imposed timeout
    pub timeout: Option<Duration>,
    pub api_base_url: String,
}

impl Debug for CalorieConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CalorieConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("models", &self.models)
            .field("timeout", &self.timeout)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for CalorieConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl CalorieConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if let Some(raw) = lookup(MODELS_ENV) {
            let models = parse_model_list(&raw);
            if models.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: MODELS_ENV,
                    value: raw,
                    reason: "no model names given".to_string(),
                });
            }
            config.models = models;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: TIMEOUT_ENV,
                value: raw.clone(),
                reason: format!("{}", e),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(BASE_URL_ENV) {
            let url = raw.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    name: BASE_URL_ENV,
                    value: raw.clone(),
                    reason: "expected an http(s) URL".to_string(),
                });
            }
            config.api_base_url = url.to_string();
        }

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn credential_status(&self) -> CredentialStatus {
        CredentialStatus::from_key(self.api_key.as_deref())
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Credential presence report, safe to show to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub exists: bool,
    pub length: usize,
    pub preview: String,
    pub message: String,
    pub instructions: String,
}

impl CredentialStatus {
    pub fn from_key(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) => {
                let preview: String = key.chars().take(KEY_PREVIEW_CHARS).collect();
                Self {
                    exists: true,
                    length: key.chars().count(),
                    preview: format!("{}...", preview),
                    message: format!("{} is set.", API_KEY_ENV),
                    instructions: "Meal calorie estimation is available.".to_string(),
                }
            }
            None => Self {
                exists: false,
                length: 0,
                preview: "not set".to_string(),
                message: format!("{} is not set.", API_KEY_ENV),
                instructions: format!(
                    "Set {}=your_api_key in the server environment and restart.",
                    API_KEY_ENV
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CalorieConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(
            config.models,
            vec!["gemini-2.0-flash-exp", "gemini-1.5-flash", "gemini-1.5-pro"]
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = CalorieConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_overrides() {
        let config = CalorieConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, " AIzaSyExampleKey123 "),
            (MODELS_ENV, "gemini-1.5-pro, ,gemini-1.5-flash"),
            (TIMEOUT_ENV, "0"),
            (BASE_URL_ENV, "http://localhost:8080/v1beta"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("AIzaSyExampleKey123"));
        assert_eq!(config.models, vec!["gemini-1.5-pro", "gemini-1.5-flash"]);
        assert_eq!(config.timeout, None);
        assert_eq!(config.api_base_url, "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_invalid_values() {
        assert!(CalorieConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "ten")])).is_err());
        assert!(CalorieConfig::from_lookup(lookup_from(&[(MODELS_ENV, " , ")])).is_err());
        assert!(CalorieConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "localhost")])).is_err());
    }

    #[test]
    fn test_credential_status() {
        let status = CredentialStatus::from_key(Some("AIzaSyExampleKey123"));
        assert!(status.exists);
        assert_eq!(status.length, 19);
        assert_eq!(status.preview, "AIzaSyExam...");

        let missing = CredentialStatus::from_key(None);
        assert!(!missing.exists);
        assert_eq!(missing.preview, "not set");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = CalorieConfig {
            api_key: Some("super-secret".to_string()),
            ..CalorieConfig::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
