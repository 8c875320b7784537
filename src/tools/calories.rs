//! Calorie MCP Tools
//!
//! Tool functions for meal intake estimation and burned-calorie calculation.

use std::time::Duration;

use serde::Serialize;

use crate::calories::met::band_for_speed;
use crate::calories::{self, BurnedCalorieInput, Gender};
use crate::meal::{EstimationError, FailureKind, MealCalorieEstimator};

// ============================================================================
// Response Structs
// ============================================================================

/// Why an estimate is missing
#[derive(Debug, Serialize)]
pub struct EstimateFailure {
    pub kind: FailureKind,
    pub reason: &'static str,
    pub message: &'static str,
    /// Diagnostic text for operators (error chain, model name)
    pub details: String,
}

impl From<&EstimationError> for EstimateFailure {
    fn from(err: &EstimationError) -> Self {
        Self {
            kind: err.kind(),
            reason: err.reason(),
            message: err.user_message(),
            details: err.to_string(),
        }
    }
}

/// Response for estimate_meal_calories
#[derive(Debug, Serialize)]
pub struct MealEstimateResponse {
    pub meal: String,
    /// Estimated intake in kcal, null when it could not be computed
    pub calories: Option<u32>,
    pub failure: Option<EstimateFailure>,
}

/// Response for calculate_burned_calories
#[derive(Debug, Serialize)]
pub struct BurnedCaloriesResponse {
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<String>,
    pub can_estimate: bool,
    pub burned_calories: u32,
    pub speed_kmh: Option<f64>,
    pub pace_min_per_km: Option<f64>,
    pub met: Option<f64>,
    pub intensity: Option<&'static str>,
}

/// Response for can_estimate_burned_calories
#[derive(Debug, Serialize)]
pub struct CanEstimateResponse {
    pub can_estimate: bool,
    pub missing: Vec<&'static str>,
}

/// Intake and burned calories for one running record, side by side
///
/// The two figures are independent and never netted against each other.
#[derive(Debug, Serialize)]
pub struct RecordCalorieSummary {
    /// Meal intake estimate (kcal)
    pub calories: Option<u32>,
    /// Energy expenditure (kcal), null when there is not enough data to show one
    pub burned_calories: Option<u32>,
}

// ============================================================================
// Calorie Tool Functions
// ============================================================================

/// Estimate meal intake calories
///
/// Estimation failures are reported in the response, not as an error, so the
/// caller can carry on without a figure.
pub async fn estimate_meal(
    estimator: &MealCalorieEstimator,
    meal: &str,
    timeout: Option<Duration>,
) -> MealEstimateResponse {
    let result = match timeout {
        Some(t) => estimator.estimate_with_timeout(meal, t).await,
        None => estimator.estimate_meal_calories(meal).await,
    };

    match result {
        Ok(kcal) => MealEstimateResponse {
            meal: meal.to_string(),
            calories: Some(kcal),
            failure: None,
        },
        Err(e) => MealEstimateResponse {
            meal: meal.to_string(),
            calories: None,
            failure: Some(EstimateFailure::from(&e)),
        },
    }
}

fn parse_gender(gender: Option<&str>) -> Result<Option<Gender>, String> {
    match gender {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Gender::from_str(s)
            .map(Some)
            .ok_or_else(|| format!("Invalid gender: '{}'. Valid values: male, female, other", s)),
    }
}

/// Calculate calories burned for a run
pub fn calculate_burned_calories(
    distance_km: Option<f64>,
    duration_minutes: Option<f64>,
    weight_kg: Option<f64>,
    gender: Option<&str>,
) -> Result<BurnedCaloriesResponse, String> {
    let input = BurnedCalorieInput {
        distance_km,
        duration_minutes,
        weight_kg,
        gender: parse_gender(gender)?,
    };

    let can_estimate = input.can_estimate();
    let speed = calories::speed_kmh(distance_km, duration_minutes);
    let band = speed.filter(|_| can_estimate).map(band_for_speed);

    Ok(BurnedCaloriesResponse {
        distance_km,
        duration_minutes,
        weight_kg,
        gender: input.gender.map(|g| g.as_str().to_string()),
        can_estimate,
        burned_calories: input.burned_calories(),
        speed_kmh: speed.map(round_2),
        pace_min_per_km: calories::pace_min_per_km(distance_km, duration_minutes).map(round_2),
        met: band.map(|b| b.met),
        intensity: band.map(|b| b.label),
    })
}

/// Whether a burned-calorie figure can be shown, and what is missing if not
pub fn can_estimate_burned_calories(
    distance_km: Option<f64>,
    duration_minutes: Option<f64>,
    weight_kg: Option<f64>,
) -> CanEstimateResponse {
    let missing: Vec<&'static str> = [
        ("distance_km", distance_km),
        ("duration_minutes", duration_minutes),
        ("weight_kg", weight_kg),
    ]
    .into_iter()
    .filter(|(_, v)| !v.map_or(false, |v| v > 0.0))
    .map(|(name, _)| name)
    .collect();

    CanEstimateResponse {
        can_estimate: calories::can_estimate(distance_km, duration_minutes, weight_kg),
        missing,
    }
}

/// Build the calorie figures shown on a running record
pub fn record_calorie_summary(
    meal_calories: Option<u32>,
    distance_km: Option<f64>,
    duration_minutes: Option<f64>,
    weight_kg: Option<f64>,
) -> RecordCalorieSummary {
    let burned_calories = calories::can_estimate(distance_km, duration_minutes, weight_kg)
        .then(|| calories::burned_calories(distance_km, duration_minutes, weight_kg));

    RecordCalorieSummary {
        calories: meal_calories,
        burned_calories,
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burned_calories_response() {
        let resp = calculate_burned_calories(Some(10.0), Some(60.0), Some(70.0), Some("male")).unwrap();
        assert!(resp.can_estimate);
        assert_eq!(resp.burned_calories, 700);
        assert_eq!(resp.speed_kmh, Some(10.0));
        assert_eq!(resp.pace_min_per_km, Some(6.0));
        assert_eq!(resp.met, Some(10.0));
        assert_eq!(resp.gender.as_deref(), Some("male"));
    }

    #[test]
    fn test_burned_calories_insufficient_data() {
        let resp = calculate_burned_calories(Some(5.0), Some(30.0), None, None).unwrap();
        assert!(!resp.can_estimate);
        assert_eq!(resp.burned_calories, 0);
        assert_eq!(resp.met, None);
        assert_eq!(resp.speed_kmh, Some(10.0));
    }

    #[test]
    fn test_burned_calories_invalid_gender() {
        let err = calculate_burned_calories(Some(5.0), Some(30.0), Some(60.0), Some("robot")).unwrap_err();
        assert!(err.contains("robot"));
        assert!(calculate_burned_calories(Some(5.0), Some(30.0), Some(60.0), Some("")).is_ok());
    }

    #[test]
    fn test_can_estimate_lists_missing_fields() {
        let resp = can_estimate_burned_calories(Some(0.0), Some(30.0), None);
        assert!(!resp.can_estimate);
        assert_eq!(resp.missing, vec!["distance_km", "weight_kg"]);

        let ok = can_estimate_burned_calories(Some(5.0), Some(30.0), Some(65.0));
        assert!(ok.can_estimate);
        assert!(ok.missing.is_empty());
    }

    #[test]
    fn test_record_summary_keeps_figures_independent() {
        let summary = record_calorie_summary(Some(850), Some(10.0), Some(60.0), Some(70.0));
        assert_eq!(summary.calories, Some(850));
        assert_eq!(summary.burned_calories, Some(700));

        let no_weight = record_calorie_summary(Some(850), Some(10.0), Some(60.0), None);
        assert_eq!(no_weight.calories, Some(850));
        assert_eq!(no_weight.burned_calories, None);

        let no_meal = record_calorie_summary(None, Some(10.0), Some(60.0), Some(70.0));
        assert_eq!(no_meal.calories, None);
        assert_eq!(no_meal.burned_calories, Some(700));
    }

    #[tokio::test]
    async fn test_estimate_meal_unconfigured_is_non_blocking() {
        let estimator = MealCalorieEstimator::unconfigured();
        let resp = estimate_meal(&estimator, "rice", Some(Duration::from_secs(1))).await;
        assert_eq!(resp.calories, None);
        let failure = resp.failure.unwrap();
        assert_eq!(failure.kind, FailureKind::Configuration);
        assert_eq!(failure.reason, "not_configured");
    }

    #[tokio::test]
    async fn test_estimate_meal_serializes_null_calories() {
        let estimator = MealCalorieEstimator::unconfigured();
        let resp = estimate_meal(&estimator, "", None).await;
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["calories"].is_null());
        assert_eq!(json["failure"]["kind"], "configuration");
    }
}
