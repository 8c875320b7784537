//! Burned-calorie calculator
//!
//! Estimates energy expenditure for a completed run with the MET formula:
//! Calories = MET × weight_kg × duration_hours

use serde::{Deserialize, Serialize};

use super::met::met_for_speed;

/// Runner gender
///
/// Carried with the input but not used by the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Inputs for a burned-calorie estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnedCalorieInput {
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl BurnedCalorieInput {
    pub fn new(distance_km: f64, duration_minutes: f64, weight_kg: f64) -> Self {
        Self {
            distance_km: Some(distance_km),
            duration_minutes: Some(duration_minutes),
            weight_kg: Some(weight_kg),
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    pub fn can_estimate(&self) -> bool {
        can_estimate(self.distance_km, self.duration_minutes, self.weight_kg)
    }

    pub fn burned_calories(&self) -> u32 {
        burned_calories(self.distance_km, self.duration_minutes, self.weight_kg)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// True when distance, duration and weight are all present and > 0
pub fn can_estimate(
    distance_km: Option<f64>,
    duration_minutes: Option<f64>,
    weight_kg: Option<f64>,
) -> bool {
    positive(distance_km).is_some()
        && positive(duration_minutes).is_some()
        && positive(weight_kg).is_some()
}

/// Average speed in km/h, if distance and duration are both positive
pub fn speed_kmh(distance_km: Option<f64>, duration_minutes: Option<f64>) -> Option<f64> {
    let distance = positive(distance_km)?;
    let duration = positive(duration_minutes)?;
    Some(distance / (duration / 60.0))
}

/// Average pace in minutes per km, if distance and duration are both positive
pub fn pace_min_per_km(distance_km: Option<f64>, duration_minutes: Option<f64>) -> Option<f64> {
    let distance = positive(distance_km)?;
    let duration = positive(duration_minutes)?;
    Some(duration / distance)
}

/// Calories burned during a run, rounded to the nearest kcal
///
/// Missing, zero, negative or NaN inputs yield 0.
pub fn burned_calories(
    distance_km: Option<f64>,
    duration_minutes: Option<f64>,
    weight_kg: Option<f64>,
) -> u32 {
    let (Some(distance), Some(duration), Some(weight)) = (
        positive(distance_km),
        positive(duration_minutes),
        positive(weight_kg),
    ) else {
        return 0;
    };

    let duration_hours = duration / 60.0;
    let speed = distance / duration_hours;
    let met = met_for_speed(speed);

    // Float-to-int `as` saturates, so absurdly large inputs clamp to u32::MAX
    (met * weight * duration_hours).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_km_in_an_hour() {
        assert_eq!(burned_calories(Some(10.0), Some(60.0), Some(70.0)), 700);
    }

    #[test]
    fn test_matches_formula() {
        let cases = [(5.0, 30.0, 65.0), (3.2, 25.0, 58.5), (21.1, 95.0, 80.0), (42.195, 180.0, 62.0)];
        for (d, t, w) in cases {
            let hours = t / 60.0;
            let expected = (met_for_speed(d / hours) * w * hours).round() as u32;
            assert_eq!(burned_calories(Some(d), Some(t), Some(w)), expected);
        }
    }

    #[test]
    fn test_five_km_in_thirty_minutes() {
        // 10 km/h -> MET 10, 65 kg, 0.5 h
        assert_eq!(burned_calories(Some(5.0), Some(30.0), Some(65.0)), 325);
    }

    #[test]
    fn test_insufficient_data_is_zero() {
        assert_eq!(burned_calories(None, Some(30.0), Some(65.0)), 0);
        assert_eq!(burned_calories(Some(5.0), None, Some(65.0)), 0);
        assert_eq!(burned_calories(Some(5.0), Some(30.0), None), 0);
        assert_eq!(burned_calories(Some(0.0), Some(30.0), Some(65.0)), 0);
        assert_eq!(burned_calories(Some(5.0), Some(-1.0), Some(65.0)), 0);
        assert_eq!(burned_calories(Some(5.0), Some(30.0), Some(-65.0)), 0);
        assert_eq!(burned_calories(Some(f64::NAN), Some(30.0), Some(65.0)), 0);
    }

    #[test]
    fn test_can_estimate() {
        assert!(can_estimate(Some(5.0), Some(30.0), Some(65.0)));
        assert!(!can_estimate(Some(0.0), Some(30.0), Some(65.0)));
        assert!(!can_estimate(Some(5.0), Some(30.0), None));
        assert!(!can_estimate(Some(5.0), Some(-30.0), Some(65.0)));
    }

    #[test]
    fn test_gender_does_not_change_result() {
        let base = BurnedCalorieInput::new(8.0, 45.0, 72.0);
        let female = base.with_gender(Some(Gender::Female));
        assert_eq!(base.burned_calories(), female.burned_calories());
        assert!(female.can_estimate());
    }

    #[test]
    fn test_speed_and_pace() {
        assert_eq!(speed_kmh(Some(10.0), Some(60.0)), Some(10.0));
        assert_eq!(pace_min_per_km(Some(5.0), Some(30.0)), Some(6.0));
        assert_eq!(speed_kmh(Some(10.0), Some(0.0)), None);
        assert_eq!(pace_min_per_km(None, Some(30.0)), None);
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!(Gender::from_str("Female"), Some(Gender::Female));
        assert_eq!(Gender::from_str(" m "), Some(Gender::Male));
        assert_eq!(Gender::from_str("unknown"), None);
        assert_eq!(Gender::Other.as_str(), "other");
    }
}
