//! Run Calories MCP Server Implementation
//!
//! Implements the MCP server with all calorie tools.

use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::CalorieConfig;
use crate::meal::MealCalorieEstimator;
use crate::tools::calories;
use crate::tools::status::StatusTracker;

/// Run Calories MCP Service
#[derive(Clone)]
pub struct CalorieService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    estimator: MealCalorieEstimator,
    /// Request-level bound on one meal estimation
    estimate_timeout: Option<Duration>,
    tool_router: ToolRouter<CalorieService>,
}

impl CalorieService {
    pub fn new(config: CalorieConfig, estimator: MealCalorieEstimator) -> Self {
        Self {
            estimate_timeout: config.timeout,
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            estimator,
            tool_router: Self::tool_router(),
        }
    }

    /// Build the service with a Gemini-backed estimator from `config`
    pub fn from_config(config: CalorieConfig) -> Self {
        let estimator = MealCalorieEstimator::from_config(&config);
        Self::new(config, estimator)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateMealCaloriesParams {
    /// Free-text meal description (e.g., "One whole fried chicken, cola 500ml")
    pub meal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BurnedCaloriesParams {
    /// Run distance in kilometres
    pub distance_km: Option<f64>,
    /// Run duration in minutes
    pub duration_minutes: Option<f64>,
    /// Runner body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Runner gender: male, female, other (optional, informational)
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CanEstimateParams {
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordCalorieSummaryParams {
    /// Meal intake estimate already stored on the record (kcal)
    pub meal_calories: Option<u32>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub weight_kg: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CalorieService {
    // --- Status ---

    #[tool(description = "Get the current status of the calorie service including build info, whether the Gemini API key is configured, the model fallback list, and process information")]
    async fn calorie_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for estimating meal calories and burned calories. Call this when unsure how to use the calorie tools.")]
    fn calorie_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALORIE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALORIE_INSTRUCTIONS)]))
    }

    // --- Meal intake ---

    #[tool(description = "Estimate the total calories (kcal) of a meal from a free-text description. Returns calories: null with a failure reason when it cannot be computed; the record can still be saved.")]
    async fn estimate_meal_calories(&self, Parameters(p): Parameters<EstimateMealCaloriesParams>) -> Result<CallToolResult, McpError> {
        let result = calories::estimate_meal(&self.estimator, &p.meal, self.estimate_timeout).await;
        to_json(&result)
    }

    // --- Burned calories ---

    #[tool(description = "Calculate calories burned on a run from distance (km), duration (minutes) and body weight (kg) using running-speed MET values. Returns 0 when any input is missing or not positive.")]
    fn calculate_burned_calories(&self, Parameters(p): Parameters<BurnedCaloriesParams>) -> Result<CallToolResult, McpError> {
        let result = calories::calculate_burned_calories(p.distance_km, p.duration_minutes, p.weight_kg, p.gender.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Check whether distance, duration and weight are all present and positive, so a burned-calorie figure can be shown")]
    fn can_estimate_burned_calories(&self, Parameters(p): Parameters<CanEstimateParams>) -> Result<CallToolResult, McpError> {
        to_json(&calories::can_estimate_burned_calories(p.distance_km, p.duration_minutes, p.weight_kg))
    }

    #[tool(description = "Get the meal intake and burned calorie figures for a running record side by side (never netted)")]
    fn record_calorie_summary(&self, Parameters(p): Parameters<RecordCalorieSummaryParams>) -> Result<CallToolResult, McpError> {
        to_json(&calories::record_calorie_summary(p.meal_calories, p.distance_km, p.duration_minutes, p.weight_kg))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CalorieService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "run-calories".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Run Calories".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Run Calories - meal intake and burned-calorie figures for running records. \
                 Call calorie_instructions first if unsure. \
                 Meals: estimate_meal_calories (null result is non-blocking). \
                 Runs: calculate_burned_calories, can_estimate_burned_calories. \
                 Records: record_calorie_summary. \
                 Status: calorie_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info() {
        let service = CalorieService::from_config(CalorieConfig::default());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "run-calories");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_estimate_tool_without_key_succeeds_with_null() {
        let service = CalorieService::from_config(CalorieConfig::default());
        let result = service
            .estimate_meal_calories(Parameters(EstimateMealCaloriesParams { meal: "rice".to_string() }))
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_burned_tool_rejects_bad_gender() {
        let service = CalorieService::from_config(CalorieConfig::default());
        let result = service.calculate_burned_calories(Parameters(BurnedCaloriesParams {
            distance_km: Some(5.0),
            duration_minutes: Some(30.0),
            weight_kg: Some(65.0),
            gender: Some("robot".to_string()),
        }));
        assert!(result.is_err());
    }
}
