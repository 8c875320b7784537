//! Run Calories Status Tool
//!
//! Provides runtime status information about the calorie service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::{CalorieConfig, CredentialStatus};

/// Usage instructions for AI assistants
pub const CALORIE_INSTRUCTIONS: &str = r#"
# Run Calories Instructions

Two independent figures are attached to a running record:

| Field             | Meaning                            | Tool                        |
|-------------------|------------------------------------|-----------------------------|
| `calories`        | Estimated intake of a pre-run meal | `estimate_meal_calories`    |
| `burned_calories` | Energy spent on the run            | `calculate_burned_calories` |

They are never netted against each other.

---

## Meal intake

**Tool:** `estimate_meal_calories`
- Pass the meal as free text, e.g. `"A bowl of rice, soybean paste stew, kimchi"`
- Returns `calories` (integer kcal) or `calories: null` with a `failure` object
- `failure.kind`:
  - `configuration` - the service has no API key; tell the user the feature is unavailable
  - `validation` - the meal text was empty
  - `backend` - the estimate could not be computed this time
- A null estimate never blocks saving the record

---

## Burned calories

**Tool:** `calculate_burned_calories`
- `distance_km`, `duration_minutes`, `weight_kg` (all > 0), optional `gender`
- Formula: MET × weight_kg × duration_hours, with MET picked from running speed

| Speed (km/h)  | MET  |
|---------------|------|
| < 8.0         | 8.0  |
| 8.0 - 9.7     | 9.0  |
| 9.7 - 11.3    | 10.0 |
| 11.3 - 12.9   | 11.0 |
| 12.9 - 14.5   | 12.5 |
| ≥ 14.5        | 14.0 |

- Missing or non-positive inputs give `burned_calories: 0`
- Call `can_estimate_burned_calories` first to decide whether to show a figure at all

---

## Record summary

**Tool:** `record_calorie_summary` returns both figures for display.
`burned_calories` is null when distance, duration or weight is missing.
"#;

/// Runtime status of the calorie service
#[derive(Debug, Clone, Serialize)]
pub struct CalorieStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Estimation backend
    pub credential: CredentialStatus,
    pub models: Vec<String>,
    pub timeout_seconds: Option<u64>,
    pub api_base_url: String,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    config: CalorieConfig,
}

impl StatusTracker {
    pub fn new(config: CalorieConfig) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            config,
        }
    }

    pub fn get_status(&self) -> CalorieStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        CalorieStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            credential: self.config.credential_status(),
            models: self.config.models.clone(),
            timeout_seconds: self.config.timeout.map(|t| t.as_secs()),
            api_base_url: self.config.api_base_url.clone(),
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_missing_credential() {
        let tracker = StatusTracker::new(CalorieConfig::default());
        let status = tracker.get_status();
        assert!(!status.credential.exists);
        assert_eq!(status.models.len(), 3);
        assert_eq!(status.timeout_seconds, Some(10));
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_status_never_serializes_full_key() {
        let config = CalorieConfig {
            api_key: Some("AIzaSyThisIsAVeryLongSecretKey".to_string()),
            ..CalorieConfig::default()
        };
        let json = serde_json::to_string(&StatusTracker::new(config).get_status()).unwrap();
        assert!(json.contains("AIzaSyThis..."));
        assert!(!json.contains("VeryLongSecretKey"));
    }
}
